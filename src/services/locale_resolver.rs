//! 语言解析服务 - 业务能力层
//!
//! 把 IP 地理位置映射为界面语言，结果在进程内只解析一次

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::infrastructure::GeoLookup;
use crate::models::{Locale, LocaleSetting};

/// 语言解析器
///
/// 在程序启动时构造一次，通过 `Arc` 注入给需要语言的组件。
/// 首次 `resolve` 最多发起一次地理位置查询，之后一直返回缓存值，
/// 查询失败时缓存 `Locale::FALLBACK`，不会重试。
pub struct LocaleResolver {
    lookup: Option<Arc<dyn GeoLookup>>,
    cached: OnceCell<Locale>,
}

impl LocaleResolver {
    /// 按 IP 自动探测
    pub fn new(lookup: Arc<dyn GeoLookup>) -> Self {
        Self {
            lookup: Some(lookup),
            cached: OnceCell::new(),
        }
    }

    /// 固定语言，不发起任何网络请求
    pub fn fixed(locale: Locale) -> Self {
        Self {
            lookup: None,
            cached: OnceCell::new_with(Some(locale)),
        }
    }

    /// 根据配置构造
    pub fn from_setting(setting: LocaleSetting, lookup: Arc<dyn GeoLookup>) -> Self {
        match setting {
            LocaleSetting::Auto => Self::new(lookup),
            LocaleSetting::Fixed(locale) => Self::fixed(locale),
        }
    }

    pub async fn resolve(&self) -> Locale {
        *self.cached.get_or_init(|| self.detect()).await
    }

    /// 已缓存的语言（尚未解析时为 None）
    pub fn cached(&self) -> Option<Locale> {
        self.cached.get().copied()
    }

    async fn detect(&self) -> Locale {
        let Some(lookup) = &self.lookup else {
            return Locale::FALLBACK;
        };

        match lookup.country_code().await {
            Ok(code) => {
                let locale = Locale::from_country_code(&code);
                info!("🌐 IP 地区: {:?}，界面语言: {}", code, locale);
                locale
            }
            Err(e) => {
                warn!("IP 检测失败，使用默认语言（{}）: {}", Locale::FALLBACK, e);
                Locale::FALLBACK
            }
        }
    }
}
