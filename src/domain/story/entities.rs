//! Story Form Context - Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 生成的故事
///
/// text 即结果面板中显示的文本，也是复制到剪贴板的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedStory {
    text: String,
    generated_at: DateTime<Utc>,
}

impl GeneratedStory {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generated_at: Utc::now(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn word_len(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
