use base64::{engine::general_purpose, Engine as _};

use crate::error::SolveError;

/// 请求中声明的图片类型，与原始文件格式无关
pub const IMAGE_MIME: &str = "image/jpeg";

/// 将图片字节编码为 Base64 字符串
pub fn encode_image(bytes: &[u8]) -> Result<String, SolveError> {
    if bytes.is_empty() {
        return Err(SolveError::Encode("图片内容为空".to_string()));
    }
    Ok(general_purpose::STANDARD.encode(bytes))
}

/// 将 Base64 字符串还原为图片字节
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, SolveError> {
    general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| SolveError::Encode(format!("Base64 解码失败: {}", e)))
}

/// 构造 data URL，用于 image_url 消息片段
pub fn to_data_url(encoded: &str) -> String {
    format!("data:{};base64,{}", IMAGE_MIME, encoded)
}
