//! Story Generator Port - 故事生成服务抽象
//!
//! 定义故事生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::story::{GeneratedStory, StoryRequest};

/// 网络层失败时显示给用户的通用提示
pub const NETWORK_FAILURE_MESSAGE: &str = "Failed to generate the story. Please try again.";

/// 故事生成错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// 服务返回非 2xx 状态
    #[error("{}", server_message(.status, .detail))]
    Server { status: u16, detail: Option<String> },

    /// 请求未能完成（连接失败、DNS 等）
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// 2xx 响应体无法解析
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

fn server_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Server error: {}", status),
    }
}

impl GenerationError {
    /// 错误面板中显示的文本
    ///
    /// 服务端错误优先使用服务端提供的 detail；网络层错误统一为通用提示
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Server { status, detail } => server_message(status, detail),
            GenerationError::Network(_) | GenerationError::Timeout => {
                NETWORK_FAILURE_MESSAGE.to_string()
            }
            GenerationError::InvalidResponse(_) => {
                "The story service returned an unreadable response".to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GenerationError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Story Generator Port
///
/// 外部故事生成服务的抽象接口
#[async_trait]
pub trait StoryGeneratorPort: Send + Sync {
    /// 发送一次生成请求并等待结果
    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_prefers_detail() {
        let err = GenerationError::Server {
            status: 422,
            detail: Some("Invalid genre".to_string()),
        };
        assert_eq!(err.user_message(), "Invalid genre");
        assert_eq!(err.to_string(), "Invalid genre");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_server_error_fallback_mentions_status() {
        let err = GenerationError::Server {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), "Server error: 500");
    }

    #[test]
    fn test_network_errors_are_generic() {
        let refused = GenerationError::Network("connection refused".to_string());
        assert_eq!(refused.user_message(), NETWORK_FAILURE_MESSAGE);
        assert_eq!(GenerationError::Timeout.user_message(), NETWORK_FAILURE_MESSAGE);
        assert_eq!(refused.status(), None);
    }
}
