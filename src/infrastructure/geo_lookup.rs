//! IP 地理位置查询 - 基础设施层
//!
//! 只负责"查当前出口 IP 的国家代码"，不关心语言映射

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::error::SolveError;

/// 国家代码查询能力
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// 返回两位国家代码（可能为空字符串）
    async fn country_code(&self) -> Result<String, SolveError>;
}

#[derive(Debug, Deserialize)]
struct GeoReply {
    #[serde(default)]
    country_code: Option<String>,
}

/// 基于 HTTP 的地理位置查询（默认 ipapi.co）
pub struct HttpGeoLookup {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpGeoLookup {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GeoLookup for HttpGeoLookup {
    async fn country_code(&self) -> Result<String, SolveError> {
        debug!("查询 IP 地理位置: {}", self.endpoint);

        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SolveError::network(&self.endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SolveError::network(&self.endpoint, e))?;

        if !status.is_success() {
            return Err(SolveError::remote(status, body));
        }

        parse_country_code(&body)
    }
}

/// 解析地理位置响应，缺少 country_code 时视为空字符串
pub fn parse_country_code(body: &str) -> Result<String, SolveError> {
    let reply: GeoReply = serde_json::from_str(body)?;
    Ok(reply.country_code.unwrap_or_default())
}
