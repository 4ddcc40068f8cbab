//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 故事生成服务配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 界面配置
    #[serde(default)]
    pub ui: UiConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 故事生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 服务基础 URL
    #[serde(default = "default_api_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,

    /// 使用内置的假客户端（不访问网络）
    #[serde(default)]
    pub fake: bool,

    /// 假客户端的模拟延迟（毫秒）
    #[serde(default = "default_fake_delay")]
    pub fake_delay_ms: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_timeout() -> u64 {
    120
}

fn default_fake_delay() -> u64 {
    500
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_api_timeout(),
            fake: false,
            fake_delay_ms: default_fake_delay(),
        }
    }
}

impl ApiConfig {
    pub fn fake_delay(&self) -> Duration {
        Duration::from_millis(self.fake_delay_ms)
    }
}

/// 界面配置
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// 复制成功提示的显示时长（毫秒）
    #[serde(default = "default_copy_feedback")]
    pub copy_feedback_ms: u64,
}

fn default_copy_feedback() -> u64 {
    2000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: default_copy_feedback(),
        }
    }
}

impl UiConfig {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 120);
        assert!(!config.api.fake);
        assert_eq!(config.ui.copy_feedback(), Duration::from_secs(2));
        assert_eq!(config.log.level, "info");
    }
}
