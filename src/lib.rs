//! storyform - 故事生成表单
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Story Form Context: 表单输入、字段校验、生成结果
//!
//! 应用层 (application/):
//! - Ports: 端口定义（StoryGenerator, FormView, Clipboard）
//! - FormController: 校验 -> 提交 -> 渲染 -> 复制
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP / Fake 故事客户端，系统剪贴板
//! - Terminal: 终端视图与交互式表单

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
