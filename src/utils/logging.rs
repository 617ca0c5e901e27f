//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::BatchReport;

/// 初始化控制台日志
///
/// 默认 info 级别，可通过 RUST_LOG 覆盖；重复调用不会报错
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n作业求解日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加一行到日志文件
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 作业批量求解模式");
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    info!("⏱️ 请求间隔: {} ms", config.batch_delay_ms);
    info!("{}", "=".repeat(60));
}

/// 记录图片加载信息
///
/// # 参数
/// - `total`: 图片总数
/// - `subject`: 科目展示名
pub fn log_images_loaded(total: usize, subject: &str) {
    info!("✓ 找到 {} 张待求解的图片", total);
    info!("📚 科目: {}", subject);
    info!("💡 将逐张顺序求解\n");
}

/// 记录单张图片开始求解
///
/// # 参数
/// - `index`: 图片序号（从 1 开始）
/// - `total`: 图片总数
/// - `file_name`: 文件名
pub fn log_item_start(index: usize, total: usize, file_name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("[图片 {}/{}] 📷 {}", index, total, file_name);
}

/// 记录批量求解完成信息
pub fn log_batch_complete(report: &BatchReport) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 批量求解完成: 真实解答 {}，模拟解答 {}，失败 {}，跳过 {}",
        report.answered, report.degraded, report.failed, report.skipped
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 批量求解结果
/// - `written`: 已写出的解答文件数
/// - `output_folder`: 解答文件目录
pub fn print_final_stats(report: &BatchReport, written: usize, output_folder: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已求解: {}/{}", report.answered + report.degraded, report.attempted);
    info!("⚠️ 其中模拟解答: {}", report.degraded);
    info!("❌ 失败: {}", report.failed);
    info!("{}", "=".repeat(60));
    info!("\n已写出 {} 个解答文件至: {}", written, output_folder);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
