//! 解答文件写入服务 - 业务能力层
//!
//! 只负责"把一张已解答图片导出为文本文件"，不关心流程

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{HomeworkItem, Locale};

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[^/.]+$").expect("Failed to compile extension regex"));

/// 解答文件写入服务
///
/// 职责：
/// - 渲染单张图片的解答文本
/// - 写入 `{原文件名}_{解答|Solution}.txt`
/// - 不出现图片列表
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写入解答文件，未解答的图片返回 None
    pub async fn write(&self, item: &HomeworkItem, locale: Locale) -> AppResult<Option<PathBuf>> {
        let Some(content) = render_artifact(item, locale) else {
            return Ok(None);
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| AppError::io(self.output_dir.display().to_string(), e))?;

        let path = self.output_dir.join(artifact_file_name(&item.file_name, locale));
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::io(path.display().to_string(), e))?;

        debug!("已写入解答文件: {}", path.display());
        Ok(Some(path))
    }
}

/// 解答文件名：去掉最后一个扩展名后追加语言后缀
pub fn artifact_file_name(original: &str, locale: Locale) -> String {
    let stem = EXTENSION.replace(original, "");
    let suffix = match locale {
        Locale::Zh => "解答",
        Locale::En => "Solution",
    };
    format!("{}_{}.txt", stem, suffix)
}

/// 渲染解答文本，没有解答时返回 None
pub fn render_artifact(item: &HomeworkItem, locale: Locale) -> Option<String> {
    let solution = item.solution()?;
    let thinking = item.thinking().filter(|t| !t.is_empty());

    let content = match locale {
        Locale::Zh => format!(
            "题目：{}\n\n思考过程：\n{}\n\n解答：\n{}",
            item.file_name,
            thinking.unwrap_or("无"),
            solution
        ),
        Locale::En => format!(
            "Problem: {}\n\nThinking Process:\n{}\n\nSolution:\n{}",
            item.file_name,
            thinking.unwrap_or("None"),
            solution
        ),
    };
    Some(content)
}
