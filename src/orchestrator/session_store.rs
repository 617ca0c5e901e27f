//! 会话内的图片集合
//!
//! 只存在于内存中，进程退出即清空。单写者模型：所有修改都经由 `&mut self`，
//! 因此不需要锁；若要并行求解，需要在外层加锁。

use crate::models::{HomeworkItem, ItemId, ItemState, SolveOutcome, SolveResult, Upload};

#[derive(Debug, Default)]
pub struct SessionStore {
    items: Vec<HomeworkItem>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加上传的图片，按顺序返回新生成的 id
    pub fn add(&mut self, uploads: impl IntoIterator<Item = Upload>) -> Vec<ItemId> {
        uploads
            .into_iter()
            .map(|upload| {
                let item = HomeworkItem::new(upload.file_name, upload.bytes);
                let id = item.id.clone();
                self.items.push(item);
                id
            })
            .collect()
    }

    /// 删除图片，id 不存在时什么也不做
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    pub fn find(&self, id: &ItemId) -> Option<&HomeworkItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn find_mut(&mut self, id: &ItemId) -> Option<&mut HomeworkItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// 写入求解结果，id 不存在时静默忽略
    pub fn update_result(&mut self, id: &ItemId, result: SolveResult) -> bool {
        self.set_done(id, result, false)
    }

    /// 合并一次求解的结果，保留是否降级的标记
    pub fn merge_outcome(&mut self, id: &ItemId, outcome: SolveOutcome) -> bool {
        let degraded = outcome.is_degraded();
        self.set_done(id, outcome.into_result(), degraded)
    }

    fn set_done(&mut self, id: &ItemId, result: SolveResult, degraded: bool) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.state = ItemState::Done { result, degraded };
                true
            }
            None => false,
        }
    }

    /// Pending → InFlight，其它状态不变并返回 false
    pub fn mark_in_flight(&mut self, id: &ItemId) -> bool {
        match self.find_mut(id) {
            Some(item) if item.state == ItemState::Pending => {
                item.state = ItemState::InFlight;
                true
            }
            _ => false,
        }
    }

    /// 请求失败且没有降级内容时，InFlight 退回 Pending
    pub fn reset_in_flight(&mut self, id: &ItemId) {
        if let Some(item) = self.find_mut(id) {
            if item.state == ItemState::InFlight {
                item.state = ItemState::Pending;
            }
        }
    }

    pub fn items(&self) -> &[HomeworkItem] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn has_unsolved(&self) -> bool {
        self.items.iter().any(|item| !item.is_solved())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
