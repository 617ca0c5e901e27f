//! 作业求解服务 - 业务能力层
//!
//! 只负责"求解一张图片"：编码图片 → 构造提示词 → 调用视觉模型 → 切分回答。
//! 远端失败时按配置降级为模拟解答，并通过 `SolveOutcome::Degraded` 标明来源。
//!
//! ## 技术栈
//! - 使用 `async-openai` 的请求类型构造 OpenAI 兼容的请求体
//! - 传输通过 `ChatTransport` 注入，默认实现基于 reqwest

use std::sync::Arc;

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
    ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
    ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, ImageUrl,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SolveError;
use crate::infrastructure::ChatTransport;
use crate::models::{Locale, SolveOutcome, SolveResult};
use crate::services::image_codec::{encode_image, to_data_url};
use crate::services::mock_response::mock_solve_result;
use crate::services::section_parser::split_response;
use crate::services::LocaleResolver;

/// 作业求解客户端
///
/// 职责：
/// - 处理单张图片，不关心批量顺序和间隔
/// - 不持有会话中的图片列表
/// - 不设置 processing 标记
pub struct SolveClient {
    transport: Arc<dyn ChatTransport>,
    locale: Arc<LocaleResolver>,
    model_name: String,
    max_tokens: u32,
    temperature: f32,
    fallback_to_mock: bool,
}

impl SolveClient {
    pub fn new(
        config: &Config,
        transport: Arc<dyn ChatTransport>,
        locale: Arc<LocaleResolver>,
    ) -> Self {
        Self {
            transport,
            locale,
            model_name: config.llm_model_name.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            fallback_to_mock: config.fallback_to_mock,
        }
    }

    /// 求解一张作业图片
    ///
    /// 开启降级（默认）时永远返回 `Ok`：远端失败会得到 `SolveOutcome::Degraded`，
    /// 其中携带模拟解答和失败原因。关闭降级时直接返回错误。
    pub async fn solve(&self, image: &[u8], subject: &str) -> Result<SolveOutcome, SolveError> {
        let locale = self.locale.resolve().await;

        match self.request_solution(image, subject, locale).await {
            Ok(result) => Ok(SolveOutcome::Answered(result)),
            Err(reason) if self.fallback_to_mock => {
                warn!("求解失败，使用模拟解答: {}", reason);
                Ok(SolveOutcome::Degraded {
                    result: mock_solve_result(subject, locale),
                    reason,
                })
            }
            Err(reason) => Err(reason),
        }
    }

    async fn request_solution(
        &self,
        image: &[u8],
        subject: &str,
        locale: Locale,
    ) -> Result<SolveResult, SolveError> {
        let encoded = encode_image(image)?;
        debug!(
            "图片编码完成: {} 字节 → {} 字符",
            image.len(),
            encoded.len()
        );

        let request = self.build_request(&encoded, subject, locale)?;
        let content = self.transport.complete(&request).await?;

        Ok(split_response(&content, locale))
    }

    /// 构造对话请求：系统消息 + 用户消息（文本 + 图片）
    pub fn build_request(
        &self,
        encoded_image: &str,
        subject: &str,
        locale: Locale,
    ) -> Result<CreateChatCompletionRequest, SolveError> {
        let (system_prompt, user_prompt) = build_prompts(subject, locale);

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?;

        let content_parts = vec![
            ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText { text: user_prompt },
            ),
            ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: to_data_url(encoded_image),
                        detail: None,
                    },
                },
            ),
        ];

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()?;

        Ok(request)
    }
}

/// 按科目和语言生成 (系统提示词, 用户提示词)
pub fn build_prompts(subject: &str, locale: Locale) -> (String, String) {
    match locale {
        Locale::En => (
            format!(
                "You are a professional {subject} teacher, skilled at solving {subject} problems. \
                 Please carefully analyze the problem in the image, first show your thinking process, \
                 then provide detailed solution steps."
            ),
            format!(
                "Please analyze this {subject} homework image, first show your thinking process, \
                 then provide a detailed solution."
            ),
        ),
        Locale::Zh => (
            format!(
                "你是一位专业的{subject}老师，擅长解答{subject}题目。\
                 请仔细分析图片中的题目，先展示你的思考过程，然后给出详细的解答步骤。"
            ),
            format!("请分析这张{subject}作业图片，先展示你的思考过程，然后给出详细的解答。"),
        ),
    }
}
