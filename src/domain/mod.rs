//! Domain Layer - 领域层
//!
//! 只有一个限界上下文:
//! - Story Form Context: 故事参数表单、字段校验、生成结果
//!
//! 另含故事文本排版工具

pub mod story;

mod text_format;

pub use text_format::format_story_text;
