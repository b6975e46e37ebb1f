use std::sync::Arc;

use versecast::config::AppConfig;
use versecast::providers::{OpenAiConfig, OpenAiProvider};
use versecast::server::{build_router, AppState};
use versecast::services::StudyService;
use versecast::telemetry::FileUsageSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "[MAIN] versecast 启动: addr={} model={}",
        config.listen_addr,
        config.model
    );

    let provider = OpenAiProvider::new(OpenAiConfig {
        api_key: config.openai_api_key.clone(),
        base_url: config.openai_base_url.clone(),
        model: config.model.clone(),
    });
    let usage_sink = Arc::new(FileUsageSink::new(config.token_usage_log.clone()));
    let service = Arc::new(StudyService::new(provider, usage_sink));

    let app = build_router(AppState { service });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("[MAIN] 监听 {}", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
