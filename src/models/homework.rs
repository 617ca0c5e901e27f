use std::fmt::Display;

use crate::error::SolveError;

/// 作业图片的唯一标识，上传时生成
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// 一次求解的结果：思考过程 + 解答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub thinking: String,
    pub solution: String,
}

/// 求解结果的来源
///
/// `Degraded` 表示远端调用失败后使用了模拟内容，调用方可据此区分真实解答
#[derive(Debug)]
pub enum SolveOutcome {
    /// 来自模型的真实解答
    Answered(SolveResult),
    /// 降级后的模拟解答
    Degraded {
        result: SolveResult,
        reason: SolveError,
    },
}

impl SolveOutcome {
    pub fn result(&self) -> &SolveResult {
        match self {
            SolveOutcome::Answered(result) | SolveOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn into_result(self) -> SolveResult {
        match self {
            SolveOutcome::Answered(result) | SolveOutcome::Degraded { result, .. } => result,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SolveOutcome::Degraded { .. })
    }
}

/// 单张图片的处理状态
///
/// 状态只会前进：Pending → InFlight → Done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    /// 等待求解
    Pending,
    /// 请求已发出，尚未合并结果
    InFlight,
    /// 已合并结果
    Done { result: SolveResult, degraded: bool },
}

/// 一张上传的作业图片
#[derive(Debug, Clone)]
pub struct HomeworkItem {
    pub id: ItemId,
    pub file_name: String,
    pub image_bytes: Vec<u8>,
    pub state: ItemState,
}

impl HomeworkItem {
    pub fn new(file_name: impl Into<String>, image_bytes: Vec<u8>) -> Self {
        Self {
            id: ItemId::generate(),
            file_name: file_name.into(),
            image_bytes,
            state: ItemState::Pending,
        }
    }

    pub fn result(&self) -> Option<&SolveResult> {
        match &self.state {
            ItemState::Done { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn solution(&self) -> Option<&str> {
        self.result().map(|r| r.solution.as_str())
    }

    pub fn thinking(&self) -> Option<&str> {
        self.result().map(|r| r.thinking.as_str())
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.state, ItemState::Done { .. })
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, ItemState::Done { degraded: true, .. })
    }
}

/// 上传时的原始文件
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_pending_without_answer() {
        let item = HomeworkItem::new("a.jpg", vec![1, 2, 3]);
        assert_eq!(item.state, ItemState::Pending);
        assert!(item.solution().is_none());
        assert!(item.thinking().is_none());
        assert!(!item.is_solved());
    }

    #[test]
    fn test_done_item_exposes_both_fields() {
        let mut item = HomeworkItem::new("a.jpg", vec![]);
        item.state = ItemState::Done {
            result: SolveResult {
                thinking: "t".to_string(),
                solution: "s".to_string(),
            },
            degraded: false,
        };
        assert_eq!(item.thinking(), Some("t"));
        assert_eq!(item.solution(), Some("s"));
        assert!(!item.is_degraded());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }
}
