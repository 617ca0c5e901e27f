//! # Homework Solver
//!
//! 把作业图片发送给视觉大模型求解，拆分出"思考过程"和"解答"并导出为文本文件
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端，只暴露能力
//! - `HttpChatTransport` - 调用 OpenAI 兼容的 `/chat/completions`
//! - `HttpGeoLookup` - 查询出口 IP 的国家代码
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单张图片
//! - `LocaleResolver` - 按 IP 决定中文 / 英文，进程内只解析一次
//! - `SolveClient` - 编码图片、构造提示词、调用模型、切分回答，失败时降级为模拟解答
//! - `ArtifactWriter` - 导出解答文本文件
//!
//! ### ③ 数据模型（Models）
//! - `HomeworkItem` - 一张作业图片及其状态（Pending → InFlight → Done）
//! - `SolveOutcome` - 区分真实解答与降级解答
//! - `Subject` / `Locale` / 界面文案
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session_store` - 会话内的图片集合
//! - `orchestrator/batch_processor` - 顺序批量求解，控制请求间隔
//! - `orchestrator/app` - 应用入口
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, SolveError};
pub use infrastructure::{ChatTransport, GeoLookup};
pub use models::{HomeworkItem, ItemId, Locale, SolveOutcome, SolveResult, Subject, Upload};
pub use orchestrator::{App, BatchOrchestrator, BatchReport, SessionStore};
pub use services::{ArtifactWriter, LocaleResolver, SolveClient};
pub use utils::logging as logger;
