//! 批量求解器 - 编排层
//!
//! ## 职责
//!
//! 1. **顺序求解**：按图片在会话中的顺序逐张求解，跳过已有解答的图片
//! 2. **请求间隔**：上一张结果合并后，下一张至少等待固定间隔才发请求
//! 3. **状态推进**：每张图片 Pending → InFlight → Done
//! 4. **processing 标记**：批量和单张求解期间置位，期间拒绝新的求解请求
//!
//! ## 设计特点
//!
//! - 从不并行发请求
//! - 无法取消进行中的请求，processing 只是给调用方看的状态
//! - 间隔通过 `sleep_until` 调度，不阻塞运行时线程

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{ItemId, SolveOutcome};
use crate::orchestrator::SessionStore;
use crate::services::SolveClient;
use crate::utils::logging::{log_batch_complete, log_item_start};
use crate::utils::truncate_text;

/// 单张图片求解结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 模型给出真实解答
    Answered,
    /// 使用了模拟解答
    Degraded,
}

/// 批量求解统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// 实际发起求解的图片数
    pub attempted: usize,
    pub answered: usize,
    pub degraded: usize,
    /// 关闭降级时请求失败的图片数
    pub failed: usize,
    /// 已有解答而跳过的图片数
    pub skipped: usize,
}

/// 请求节拍：记录下一次请求最早可以发出的时刻
struct Pacer {
    delay: Duration,
    next_slot: Option<Instant>,
}

impl Pacer {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_slot: None,
        }
    }

    async fn wait_turn(&mut self) {
        if let Some(slot) = self.next_slot {
            tokio::time::sleep_until(slot).await;
        }
    }

    fn schedule_next(&mut self) {
        self.next_slot = Some(Instant::now() + self.delay);
    }
}

/// processing 标记的持有者，离开作用域时清除标记
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// 批量求解编排器
pub struct BatchOrchestrator {
    client: Arc<SolveClient>,
    delay: Duration,
    processing: AtomicBool,
    verbose_logging: bool,
}

impl BatchOrchestrator {
    pub fn new(client: Arc<SolveClient>, delay: Duration) -> Self {
        Self {
            client,
            delay,
            processing: AtomicBool::new(false),
            verbose_logging: false,
        }
    }

    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    /// 是否有求解正在进行
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    fn begin(&self) -> AppResult<ProcessingGuard<'_>> {
        self.processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| AppError::Busy)?;
        Ok(ProcessingGuard {
            flag: &self.processing,
        })
    }

    /// 求解单张图片
    ///
    /// id 不存在或图片不处于 Pending 时返回 `Ok(None)`。
    /// 已解答的图片需要重新求解时，调用方应先删除再上传。
    pub async fn solve_one(
        &self,
        store: &mut SessionStore,
        id: &ItemId,
        subject: &str,
    ) -> AppResult<Option<ProcessResult>> {
        let _guard = self.begin()?;
        self.solve_item(store, id, subject).await
    }

    /// 按顺序求解所有未解答的图片
    pub async fn batch_solve(
        &self,
        store: &mut SessionStore,
        subject: &str,
    ) -> AppResult<BatchReport> {
        let _guard = self.begin()?;

        // 以开始时的顺序为准
        let ids = store.ids();
        let total = ids.len();
        let mut report = BatchReport::default();
        let mut pacer = Pacer::new(self.delay);

        for (idx, id) in ids.iter().enumerate() {
            let Some(item) = store.find(id) else {
                continue;
            };
            if item.is_solved() {
                debug!("[图片 {}/{}] 已有解答，跳过", idx + 1, total);
                report.skipped += 1;
                continue;
            }

            pacer.wait_turn().await;
            if let Some(item) = store.find(id) {
                log_item_start(idx + 1, total, &item.file_name);
            }

            let outcome = self.solve_item(store, id, subject).await;
            pacer.schedule_next();

            match outcome {
                Ok(Some(ProcessResult::Answered)) => report.answered += 1,
                Ok(Some(ProcessResult::Degraded)) => report.degraded += 1,
                Ok(None) => continue,
                Err(e) => {
                    error!("[图片 {}/{}] ❌ 求解失败: {}", idx + 1, total, e);
                    report.failed += 1;
                }
            }
            report.attempted += 1;
        }

        log_batch_complete(&report);
        Ok(report)
    }

    /// 单张求解的公共部分，不触碰 processing 标记
    async fn solve_item(
        &self,
        store: &mut SessionStore,
        id: &ItemId,
        subject: &str,
    ) -> AppResult<Option<ProcessResult>> {
        if !store.mark_in_flight(id) {
            return Ok(None);
        }

        let solved = match store.find(id) {
            Some(item) => self.client.solve(&item.image_bytes, subject).await,
            None => return Ok(None),
        };

        let outcome = match solved {
            Ok(outcome) => outcome,
            Err(e) => {
                store.reset_in_flight(id);
                return Err(e.into());
            }
        };

        let result = match &outcome {
            SolveOutcome::Answered(answer) => {
                info!("✓ 求解完成");
                if self.verbose_logging {
                    info!("思考: {}", truncate_text(&answer.thinking, 80));
                    info!("解答: {}", truncate_text(&answer.solution, 80));
                }
                ProcessResult::Answered
            }
            SolveOutcome::Degraded { reason, .. } => {
                warn!("⚠️ 已使用模拟解答 (原因: {})", reason);
                ProcessResult::Degraded
            }
        };

        store.merge_outcome(id, outcome);
        Ok(Some(result))
    }
}
