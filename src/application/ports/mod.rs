//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod clipboard;
mod form_view;
mod story_generator;

pub use clipboard::{ClipboardError, ClipboardPort};
pub use form_view::{FormViewPort, Panel};
pub use story_generator::{GenerationError, StoryGeneratorPort, NETWORK_FAILURE_MESSAGE};
