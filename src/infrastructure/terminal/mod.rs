//! Terminal Front End - 终端前端
//!
//! FormViewPort 的终端实现和交互式表单会话

mod form;
mod view;

pub use form::TerminalForm;
pub use view::TerminalView;
