//! 应用入口 - 编排层
//!
//! 负责组装各层组件，扫描图片目录、批量求解并导出解答文件

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::{HttpChatTransport, HttpGeoLookup};
use crate::models::{translate, Locale, Upload};
use crate::orchestrator::{BatchOrchestrator, BatchReport, SessionStore};
use crate::services::{ArtifactWriter, LocaleResolver, SolveClient};
use crate::utils::logging::{
    append_log_line, init_log_file, log_images_loaded, log_startup, print_final_stats,
};

/// 支持的图片扩展名
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// 一次运行的结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub report: BatchReport,
    /// 写出的解答文件数
    pub written: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    locale: Locale,
    orchestrator: BatchOrchestrator,
    writer: ArtifactWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        log_startup(&config);

        if config.llm_api_key.is_empty() {
            warn!("⚠️ 未配置 LLM_API_KEY，请求大概率失败并降级为模拟解答");
        }

        let http = reqwest::Client::new();

        // 语言只解析一次，之后通过 Arc 共享
        let geo = Arc::new(HttpGeoLookup::new(http.clone(), &config.geo_endpoint));
        let resolver = Arc::new(LocaleResolver::from_setting(config.locale, geo));
        let locale = resolver.resolve().await;

        let transport = Arc::new(HttpChatTransport::new(
            http,
            &config.llm_api_base_url,
            &config.llm_api_key,
        ));
        let client = Arc::new(SolveClient::new(&config, transport, resolver));

        Ok(Self::with_client(config, client, locale))
    }

    /// 使用已构造的求解客户端组装应用
    pub fn with_client(config: Config, client: Arc<SolveClient>, locale: Locale) -> Self {
        let orchestrator = BatchOrchestrator::new(client, config.batch_delay())
            .with_verbose_logging(config.verbose_logging);
        let writer = ArtifactWriter::new(&config.output_folder);

        Self {
            config,
            locale,
            orchestrator,
            writer,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        info!(
            "{} - {}",
            translate(self.locale, "app.title"),
            translate(self.locale, "app.subtitle")
        );

        let uploads = load_uploads(Path::new(&self.config.input_folder)).await?;
        if uploads.is_empty() {
            warn!("⚠️ 目录 {} 中没有待求解的图片，程序结束", self.config.input_folder);
            return Ok(RunSummary::default());
        }

        let subject = self.config.subject.display_name(self.locale);
        log_images_loaded(uploads.len(), subject);

        let mut store = SessionStore::new();
        store.add(uploads);

        info!("{}", translate(self.locale, "batch.solving"));
        let report = self.orchestrator.batch_solve(&mut store, subject).await?;

        let mut written = 0;
        for item in store.items() {
            let status = match self.writer.write(item, self.locale).await? {
                Some(path) => {
                    written += 1;
                    format!("{} → {}", translate(self.locale, "solved"), path.display())
                }
                None => translate(self.locale, "error.solve_failed").to_string(),
            };
            let marker = if item.is_degraded() { " (mock)" } else { "" };
            append_log_line(
                &self.config.output_log_file,
                &format!("{} | {}{}", item.file_name, status, marker),
            )?;
        }

        print_final_stats(&report, written, &self.config.output_folder);

        Ok(RunSummary { report, written })
    }
}

/// 扫描目录中的图片文件，按文件名排序
pub async fn load_uploads(folder: &Path) -> Result<Vec<Upload>> {
    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder.display());
    }

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("无法读取图片: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        info!("正在加载: {} ({} 字节)", file_name, bytes.len());
        uploads.push(Upload::new(file_name, bytes));
    }

    Ok(uploads)
}
