//! HTTP Story Client - 调用外部故事生成 HTTP 服务
//!
//! 实现 StoryGeneratorPort trait，通过 HTTP 调用故事生成服务
//!
//! 外部 API:
//! POST http://localhost:8000/generate-story
//! Request: {"word_count": 300, "creativity_level": "...", "genre": "...", "category": "...", "suggestions": "..."|null}
//! Response (2xx): {"story": "..."} 或 {"content": "..."}
//! Response (错误): {"detail": "..."}（可选）

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{GenerationError, StoryGeneratorPort};
use crate::domain::story::{GeneratedStory, StoryRequest};

/// 生成接口路径
pub const GENERATE_STORY_PATH: &str = "/generate-story";

/// 响应中既没有 story 也没有 content 时显示的文本
pub const GENERATED_FALLBACK_TEXT: &str = "Story generated successfully";

/// HTTP 故事客户端配置
#[derive(Debug, Clone)]
pub struct HttpStoryClientConfig {
    /// 故事生成服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpStoryClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpStoryClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 故事客户端
pub struct HttpStoryClient {
    client: Client,
    config: HttpStoryClientConfig,
}

impl HttpStoryClient {
    /// 创建新的 HTTP 故事客户端
    pub fn new(config: HttpStoryClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL
    pub fn generate_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            GENERATE_STORY_PATH
        )
    }
}

/// 从 2xx 响应体中提取故事文本
///
/// story 优先，其次 content；都没有（或为空）时使用通用成功提示
fn extract_story_text(body: &Value) -> String {
    ["story", "content"]
        .iter()
        .filter_map(|key| body.get(key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(GENERATED_FALLBACK_TEXT)
        .to_string()
}

/// 从错误响应体中提取 detail
///
/// detail 为字符串时原样使用，为数组/对象（如字段校验详情）时序列化为 JSON 文本
fn extract_error_detail(body: &str) -> Option<String> {
    let body: Value = serde_json::from_str(body).ok()?;
    match body.get("detail")? {
        Value::Null => None,
        Value::String(detail) if detail.is_empty() => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl StoryGeneratorPort for HttpStoryClient {
    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, GenerationError> {
        let url = self.generate_url();

        tracing::debug!(
            url = %url,
            word_count = request.word_count.value(),
            genre = %request.genre.as_str(),
            "Sending story generation request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::Network(format!("Cannot connect to story service: {}", e))
                } else {
                    GenerationError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = extract_error_detail(&error_text);
            tracing::warn!(
                status = status.as_u16(),
                detail = ?detail,
                "Story service returned an error status"
            );
            return Err(GenerationError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::Network(format!("Failed to read response: {}", e))
            }
        })?;
        let body: Value = serde_json::from_str(&body_text)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let story = GeneratedStory::new(extract_story_text(&body));

        tracing::info!(
            status = status.as_u16(),
            story_len = story.text().len(),
            words = story.word_len(),
            "Story received"
        );

        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::application::NETWORK_FAILURE_MESSAGE;
    use crate::domain::story::FormInput;

    /// 启动一个本地桩服务，返回其 base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn stub_responding(status: StatusCode, body: &'static str) -> String {
        spawn_stub(Router::new().route(
            GENERATE_STORY_PATH,
            post(move || async move { (status, body) }),
        ))
        .await
    }

    fn request() -> StoryRequest {
        FormInput {
            word_count: "250".to_string(),
            creativity_level: "high".to_string(),
            genre: "mystery".to_string(),
            category: "short story".to_string(),
            suggestions: String::new(),
        }
        .validate()
        .unwrap()
    }

    fn client(base_url: &str) -> HttpStoryClient {
        HttpStoryClient::new(HttpStoryClientConfig::new(base_url).with_timeout(5)).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpStoryClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_generate_url_tolerates_trailing_slash() {
        let client = client("http://example.com:9000/");
        assert_eq!(client.generate_url(), "http://example.com:9000/generate-story");
    }

    #[test]
    fn test_extract_story_text() {
        assert_eq!(extract_story_text(&json!({"story": "A"})), "A");
        assert_eq!(extract_story_text(&json!({"content": "B"})), "B");
        assert_eq!(extract_story_text(&json!({"story": "", "content": "B"})), "B");
        assert_eq!(extract_story_text(&json!({"story": "A", "content": "B"})), "A");
        assert_eq!(extract_story_text(&json!({})), GENERATED_FALLBACK_TEXT);
        assert_eq!(extract_story_text(&json!("plain")), GENERATED_FALLBACK_TEXT);
    }

    #[test]
    fn test_extract_error_detail() {
        assert_eq!(
            extract_error_detail(r#"{"detail": "Invalid genre"}"#).as_deref(),
            Some("Invalid genre")
        );
        assert_eq!(extract_error_detail(r#"{"detail": null}"#), None);
        assert_eq!(extract_error_detail(r#"{"message": "x"}"#), None);
        assert_eq!(extract_error_detail("Internal Server Error"), None);
        assert_eq!(
            extract_error_detail(r#"{"detail": [{"loc": ["body", "genre"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body","genre"]}]"#)
        );
    }

    #[tokio::test]
    async fn test_success_story() {
        let base_url =
            stub_responding(StatusCode::OK, r#"{"story": "Once upon a time..."}"#).await;

        let story = client(&base_url).generate(&request()).await.unwrap();
        assert_eq!(story.text(), "Once upon a time...");
    }

    #[tokio::test]
    async fn test_success_content_key() {
        let base_url = stub_responding(StatusCode::OK, r#"{"content": "The end."}"#).await;

        let story = client(&base_url).generate(&request()).await.unwrap();
        assert_eq!(story.text(), "The end.");
    }

    #[tokio::test]
    async fn test_request_body_sent_as_json() {
        let router = Router::new().route(
            GENERATE_STORY_PATH,
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "story": body.to_string() }))
            }),
        );
        let base_url = spawn_stub(router).await;

        let story = client(&base_url).generate(&request()).await.unwrap();
        let echoed: Value = serde_json::from_str(story.text()).unwrap();
        assert_eq!(
            echoed,
            json!({
                "word_count": 250,
                "creativity_level": "high",
                "genre": "mystery",
                "category": "short story",
                "suggestions": null
            })
        );
    }

    #[tokio::test]
    async fn test_server_detail() {
        let base_url = stub_responding(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": "Invalid genre"}"#,
        )
        .await;

        let err = client(&base_url).generate(&request()).await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::Server {
                status: 422,
                detail: Some("Invalid genre".to_string())
            }
        );
        assert_eq!(err.user_message(), "Invalid genre");
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let base_url = stub_responding(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;

        let err = client(&base_url).generate(&request()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(err.user_message().contains("500"));
    }

    #[tokio::test]
    async fn test_unparseable_success_body() {
        let base_url = stub_responding(StatusCode::OK, "<html>not json</html>").await;

        let err = client(&base_url).generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .generate(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Network(_)));
        assert_eq!(err.user_message(), NETWORK_FAILURE_MESSAGE);
    }
}
