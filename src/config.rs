use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{LocaleSetting, Subject};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次回答的最大 token 数
    pub max_tokens: u32,
    /// 采样温度
    pub temperature: f32,
    // --- 语言探测 ---
    /// IP 地理位置查询地址
    pub geo_endpoint: String,
    /// auto 表示按 IP 探测
    pub locale: LocaleSetting,
    // --- 求解流程 ---
    /// 当前选择的科目
    pub subject: Subject,
    /// 批量求解时两次请求之间的间隔（毫秒）
    pub batch_delay_ms: u64,
    /// 远端调用失败时是否返回模拟解答
    pub fallback_to_mock: bool,
    // --- 文件 ---
    /// 待求解图片目录
    pub input_folder: String,
    /// 解答文件输出目录
    pub output_folder: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.suanli.cn/v1".to_string(),
            llm_model_name: "gpt-4-vision-preview".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            geo_endpoint: "https://ipapi.co/json/".to_string(),
            locale: LocaleSetting::Auto,
            subject: Subject::Math,
            batch_delay_ms: 1000,
            fallback_to_mock: true,
            input_folder: "homework".to_string(),
            output_folder: "solutions".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
        }
    }
}

/// 配置文件中的可选项，未填写的字段保留默认值
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    llm_api_key: Option<String>,
    llm_api_base_url: Option<String>,
    llm_model_name: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    geo_endpoint: Option<String>,
    locale: Option<String>,
    subject: Option<String>,
    batch_delay_ms: Option<u64>,
    fallback_to_mock: Option<bool>,
    input_folder: Option<String>,
    output_folder: Option<String>,
    output_log_file: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 默认配置文件名
    pub const DEFAULT_FILE: &'static str = "solver.toml";

    /// 加载配置：默认值 → 配置文件（如存在） → 环境变量
    pub fn load() -> AppResult<Self> {
        Self::load_from(std::env::var("SOLVER_CONFIG").ok().as_deref())
    }

    /// 指定了配置文件时文件必须存在；未指定时 `solver.toml` 可有可无
    pub fn load_from(explicit: Option<&str>) -> AppResult<Self> {
        let base = match explicit {
            Some(path) if !Path::new(path).exists() => {
                return Err(AppError::Config(format!("配置文件不存在: {}", path)));
            }
            Some(path) => Self::from_file(path)?,
            None if Path::new(Self::DEFAULT_FILE).exists() => Self::from_file(Self::DEFAULT_FILE)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }

    /// 只读取环境变量，其余使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 从 TOML 文件读取
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let file: FileConfig = toml::from_str(content)?;
        let default = Self::default();

        let locale = match file.locale {
            Some(s) => LocaleSetting::parse(&s)
                .ok_or_else(|| AppError::Config(format!("无法识别的语言设置: {}", s)))?,
            None => default.locale,
        };
        let subject = match file.subject {
            Some(s) => {
                Subject::parse(&s).ok_or_else(|| AppError::Config(format!("无法解析科目: {}", s)))?
            }
            None => default.subject,
        };

        Ok(Self {
            llm_api_key: file.llm_api_key.unwrap_or(default.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(default.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(default.llm_model_name),
            max_tokens: file.max_tokens.unwrap_or(default.max_tokens),
            temperature: file.temperature.unwrap_or(default.temperature),
            geo_endpoint: file.geo_endpoint.unwrap_or(default.geo_endpoint),
            locale,
            subject,
            batch_delay_ms: file.batch_delay_ms.unwrap_or(default.batch_delay_ms),
            fallback_to_mock: file.fallback_to_mock.unwrap_or(default.fallback_to_mock),
            input_folder: file.input_folder.unwrap_or(default.input_folder),
            output_folder: file.output_folder.unwrap_or(default.output_folder),
            output_log_file: file.output_log_file.unwrap_or(default.output_log_file),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    /// 用环境变量覆盖，无法解析的值保留原值
    pub fn with_env(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_tokens),
            temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.temperature),
            geo_endpoint: std::env::var("GEO_ENDPOINT").unwrap_or(self.geo_endpoint),
            locale: std::env::var("LOCALE").ok().and_then(|v| LocaleSetting::parse(&v)).unwrap_or(self.locale),
            subject: std::env::var("SUBJECT").ok().and_then(|v| Subject::parse(&v)).unwrap_or(self.subject),
            batch_delay_ms: std::env::var("BATCH_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.batch_delay_ms),
            fallback_to_mock: std::env::var("FALLBACK_TO_MOCK").ok().and_then(|v| v.parse().ok()).unwrap_or(self.fallback_to_mock),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(self.input_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(self.output_folder),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    pub fn batch_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.batch_delay_ms)
    }
}
