//! Fake Story Client - 用于测试和离线演示的故事生成客户端
//!
//! 不实际调用故事生成服务，按请求参数拼出一段固定故事

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::{GenerationError, StoryGeneratorPort};
use crate::domain::story::{GeneratedStory, StoryRequest};

/// Fake Story Client 配置
#[derive(Debug, Clone)]
pub struct FakeStoryClientConfig {
    /// 模拟的生成延迟
    pub delay: Duration,
}

impl Default for FakeStoryClientConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }
}

impl FakeStoryClientConfig {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Fake Story Client
pub struct FakeStoryClient {
    config: FakeStoryClientConfig,
}

impl FakeStoryClient {
    pub fn new(config: FakeStoryClientConfig) -> Self {
        tracing::info!(delay_ms = config.delay.as_millis() as u64, "FakeStoryClient initialized");
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeStoryClientConfig::default())
    }
}

fn compose_story(request: &StoryRequest) -> String {
    let mut story = format!(
        "Once upon a time, in a {} {} told with {} creativity, a story of about {} words began.",
        request.genre.as_str(),
        request.category.as_str(),
        request.creativity_level.as_str(),
        request.word_count,
    );
    if let Some(suggestions) = &request.suggestions {
        story.push_str(&format!("\nIt followed one wish: {}.", suggestions));
    }
    story.push_str("\nAnd that is where it ends.");
    story
}

#[async_trait]
impl StoryGeneratorPort for FakeStoryClient {
    async fn generate(&self, request: &StoryRequest) -> Result<GeneratedStory, GenerationError> {
        tracing::debug!(
            word_count = request.word_count.value(),
            genre = %request.genre.as_str(),
            "FakeStoryClient: returning composed story"
        );

        // 模拟生成延迟
        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }

        Ok(GeneratedStory::new(compose_story(request)))
    }
}
