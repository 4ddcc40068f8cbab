//! Story Generator Adapters

mod fake_story_client;
mod http_story_client;

pub use fake_story_client::{FakeStoryClient, FakeStoryClientConfig};
pub use http_story_client::{
    HttpStoryClient, HttpStoryClientConfig, GENERATED_FALLBACK_TEXT, GENERATE_STORY_PATH,
};
