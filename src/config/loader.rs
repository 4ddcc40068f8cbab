//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（storyform.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["storyform", "storyform.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STORYFORM_`，层级分隔符 `__`）
/// 2. 配置文件（storyform.toml 或 storyform.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STORYFORM_API__URL=http://story-server:8000`
/// - `STORYFORM_API__TIMEOUT_SECS=60`
/// - `STORYFORM_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("api.url", "http://localhost:8000")?
        .set_default("api.timeout_secs", 120)?
        .set_default("api.fake", false)?
        .set_default("api.fake_delay_ms", 500)?
        .set_default("ui.copy_feedback_ms", 2000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: STORYFORM_API__URL=http://story-server:8000
    builder = builder.add_source(
        Environment::with_prefix("STORYFORM")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.api.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "API URL cannot be empty".to_string(),
        ));
    }

    if !config.api.url.starts_with("http://") && !config.api.url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "API URL must start with http:// or https://, got {}",
            config.api.url
        )));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "API timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    if config.api.fake {
        tracing::info!("Story API: fake client ({}ms delay)", config.api.fake_delay_ms);
    } else {
        tracing::info!("Story API URL: {}", config.api.url);
        tracing::info!("Story API Timeout: {}s", config.api.timeout_secs);
    }
    tracing::info!("Copy Feedback: {}ms", config.ui.copy_feedback_ms);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_url() {
        let mut config = AppConfig::default();
        config.api.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_non_http_url() {
        let mut config = AppConfig::default();
        config.api.url = "localhost:8000".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storyform.toml");
        std::fs::write(
            &path,
            "[api]\nurl = \"https://stories.example.com\"\ntimeout_secs = 30\n\n[ui]\ncopy_feedback_ms = 1500\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.api.url, "https://stories.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.copy_feedback_ms, 1500);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storyform.toml");
        std::fs::write(&path, "[api]\nurl = \"\"\n").unwrap();

        let err = load_config_from_path(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
