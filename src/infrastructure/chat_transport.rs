//! 对话补全接口传输 - 基础设施层
//!
//! 持有 HTTP 客户端和 API 凭据，只暴露"发一次对话请求，拿回文本"的能力

use async_openai::types::chat::CreateChatCompletionRequest;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SolveError;

/// 对话补全能力
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// 发送请求，返回第一个候选的消息文本
    async fn complete(&self, request: &CreateChatCompletionRequest) -> Result<String, SolveError>;
}

/// 通过 `{base_url}/chat/completions` 调用 OpenAI 兼容接口
pub struct HttpChatTransport {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
}

impl HttpChatTransport {
    pub fn new(
        http: reqwest::Client,
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn complete(&self, request: &CreateChatCompletionRequest) -> Result<String, SolveError> {
        let endpoint = self.endpoint();
        debug!("调用对话接口: {}，模型: {}", endpoint, request.model);

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| SolveError::network(&endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SolveError::network(&endpoint, e))?;

        if !status.is_success() {
            warn!("对话接口返回错误状态: {}", status);
            return Err(SolveError::remote(status, body));
        }

        debug!("对话接口调用成功，响应长度: {} 字节", body.len());
        extract_message_content(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    choices: Vec<ReplyChoice>,
}

#[derive(Debug, Deserialize)]
struct ReplyChoice {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// 从 `{choices:[{message:{content}}]}` 中取出第一个候选的文本
pub fn extract_message_content(body: &str) -> Result<String, SolveError> {
    let reply: ChatReply = serde_json::from_str(body)?;

    reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| SolveError::Parse("模型返回内容为空".to_string()))
}
