//! Clipboard Port - 系统剪贴板抽象

use async_trait::async_trait;
use thiserror::Error;

/// 剪贴板错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("Clipboard not available")]
    NotAvailable,

    #[error("Clipboard payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Clipboard write failed: {0}")]
    WriteError(String),
}

/// Clipboard Port
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// 将文本写入系统剪贴板
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
