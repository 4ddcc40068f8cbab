//! storyform - 故事生成表单
//!
//! 终端前端：逐项填写故事参数，提交到故事生成服务并显示结果

use std::sync::Arc;

use storyform::application::{FormController, FormControllerConfig, StoryGeneratorPort};
use storyform::config::{load_config, print_config, LogConfig};
use storyform::infrastructure::adapters::{
    FakeStoryClient, FakeStoryClientConfig, HttpStoryClient, HttpStoryClientConfig,
    SystemClipboard,
};
use storyform::infrastructure::terminal::{TerminalForm, TerminalView};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("storyform - story generation form");
    print_config(&config);

    // 创建故事生成客户端
    let generator: Arc<dyn StoryGeneratorPort> = if config.api.fake {
        Arc::new(FakeStoryClient::new(
            FakeStoryClientConfig::default().with_delay(config.api.fake_delay()),
        ))
    } else {
        let client_config =
            HttpStoryClientConfig::new(&config.api.url).with_timeout(config.api.timeout_secs);
        Arc::new(HttpStoryClient::new(client_config)?)
    };

    let clipboard = Arc::new(SystemClipboard::detect());
    let view = Arc::new(TerminalView::stdout());

    let controller = Arc::new(FormController::new(
        generator,
        view.clone(),
        clipboard,
        FormControllerConfig {
            copy_feedback: config.ui.copy_feedback(),
        },
    ));

    let mut form = TerminalForm::new(controller, view, BufReader::new(tokio::io::stdin()));
    form.run().await?;

    tracing::info!("Session finished");

    Ok(())
}

/// 初始化日志（输出到 stderr，stdout 留给表单）
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},storyform={}", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
