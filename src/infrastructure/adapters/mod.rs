//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod clipboard;
pub mod story;

pub use clipboard::*;
pub use story::*;
