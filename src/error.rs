use thiserror::Error;

/// 求解链路错误
///
/// 覆盖一次求解中可能出现的全部失败：网络、非 2xx 响应、响应结构异常、请求编码失败
#[derive(Debug, Error)]
pub enum SolveError {
    /// 网络请求失败（连接、超时、读取响应体）
    #[error("网络请求失败 ({endpoint}): {message}")]
    Network { endpoint: String, message: String },

    /// API 返回非成功状态码
    #[error("API错误: {status} - {body}")]
    RemoteApi { status: String, body: String },

    /// 响应结构不符合预期
    #[error("响应解析失败: {0}")]
    Parse(String),

    /// 图片或请求体编码失败
    #[error("请求编码失败: {0}")]
    Encode(String),
}

impl SolveError {
    /// 从 reqwest 错误构造网络错误
    pub fn network(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        SolveError::Network {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    /// 非 2xx 响应，status 取原因短语（如 "Service Unavailable"）
    pub fn remote(status: reqwest::StatusCode, body: String) -> Self {
        SolveError::RemoteApi {
            status: status
                .canonical_reason()
                .unwrap_or(status.as_str())
                .to_string(),
            body,
        }
    }
}

impl From<serde_json::Error> for SolveError {
    fn from(err: serde_json::Error) -> Self {
        SolveError::Parse(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for SolveError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        SolveError::Encode(err.to_string())
    }
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 已有求解任务在进行中
    #[error("已有求解任务正在进行，请稍后再试")]
    Busy,

    /// 求解失败（仅在关闭模拟降级时出现）
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl AppError {
    /// 创建文件错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_api_error_carries_status_and_body() {
        let err = SolveError::RemoteApi {
            status: "Unauthorized".to_string(),
            body: "{\"error\":\"bad key\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Unauthorized"));
        assert!(text.contains("bad key"));
    }

    #[test]
    fn test_remote_uses_reason_phrase() {
        let err = SolveError::remote(reqwest::StatusCode::NOT_FOUND, "no".to_string());
        assert!(matches!(
            err,
            SolveError::RemoteApi { ref status, ref body } if status == "Not Found" && body == "no"
        ));
    }

    #[test]
    fn test_solve_error_wraps_into_app_error() {
        let app: AppError = SolveError::Parse("choices 缺失".to_string()).into();
        assert!(matches!(app, AppError::Solve(SolveError::Parse(_))));
        assert_eq!(app.to_string(), "响应解析失败: choices 缺失");
    }
}
