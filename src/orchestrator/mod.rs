//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层持有会话中的图片集合，负责求解顺序和节奏，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `session_store` - 会话图片集合
//! - 上传、删除、查找、写入结果
//! - 仅存于内存
//!
//! ### `batch_processor` - 批量求解器
//! - 顺序遍历未解答的图片
//! - 控制请求间隔
//! - 维护 processing 标记
//!
//! ### `app` - 应用入口
//! - 组装各层组件
//! - 扫描图片目录、导出解答文件、输出统计
//!
//! ## 层次关系
//!
//! ```text
//! app (扫描目录 / 导出文件)
//!     ↓
//! batch_processor (处理 Vec<HomeworkItem>)
//!     ↓
//! services::SolveClient (处理单张图片)
//!     ↓
//! infrastructure (HTTP：对话接口 / IP 地理位置)
//! ```

pub mod app;
pub mod batch_processor;
pub mod session_store;

pub use app::{load_uploads, App, RunSummary};
pub use batch_processor::{BatchOrchestrator, BatchReport, ProcessResult};
pub use session_store::SessionStore;
