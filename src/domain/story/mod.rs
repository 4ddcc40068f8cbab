//! Story Form Context - 故事表单限界上下文
//!
//! 职责:
//! - 表单原始输入与字段定义
//! - 字段级校验（字数范围、必选项）
//! - 校验通过后的生成请求与生成结果

mod entities;
mod errors;
mod form;
mod value_objects;

pub use entities::GeneratedStory;
pub use errors::{FieldError, FieldErrors};
pub use form::{FormField, FormInput, StoryRequest};
pub use value_objects::{Category, CreativityLevel, Genre, WordCount};
