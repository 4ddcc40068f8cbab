//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryGenerator、FormView、Clipboard）
//! - controller: 表单控制器（校验、提交、渲染、复制）
//! - state: 提交状态
//! - error: 应用层错误定义

pub mod controller;
pub mod error;
pub mod ports;
pub mod state;

// Re-exports
pub use controller::{CopyOutcome, FormController, FormControllerConfig, COPY_FAILED_MESSAGE};
pub use error::SubmitError;
pub use ports::{
    ClipboardError, ClipboardPort, FormViewPort, GenerationError, Panel, StoryGeneratorPort,
    NETWORK_FAILURE_MESSAGE,
};
pub use state::SubmissionState;
