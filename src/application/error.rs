//! 应用层错误定义
//!
//! 表单提交流程的统一错误类型

use thiserror::Error;

use crate::application::ports::GenerationError;
use crate::domain::story::FieldErrors;

/// 提交错误
///
/// 所有错误只终止当前这一次提交，控制器总会回到空闲状态
#[derive(Debug, Error)]
pub enum SubmitError {
    /// 已有请求在进行中
    #[error("A story is already being generated")]
    Busy,

    /// 字段校验失败，请求未发出
    #[error("Validation error: {0}")]
    Invalid(#[from] FieldErrors),

    /// 请求已发出但失败
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl SubmitError {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitError::Busy)
    }
}
