use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use translator_bot::{
    config::Config,
    router::{CommandRouter, RouterSettings},
    server,
    session::SessionStore,
    telegram::TelegramClient,
    translation::HttpTranslator,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translator_bot=info".parse()?),
        )
        .init();

    info!("Starting translator bot");

    let config = Config::from_env()?;

    let telegram = TelegramClient::from_config(&config);
    let router = Arc::new(CommandRouter::new(
        SessionStore::new(),
        telegram.clone(),
        HttpTranslator::from_config(&config),
        RouterSettings::from_config(&config),
    ));

    telegram
        .set_webhook(&config.webhook_url, config.webhook_secret.as_deref())
        .await
        .context("Failed to register webhook")?;

    let app = server::app(router, &config.webhook_path, config.webhook_secret.clone());
    server::serve(app, config.port, shutdown_signal()).await?;

    if let Err(e) = telegram.delete_webhook().await {
        warn!("Failed to delete webhook on shutdown: {:#}", e);
    }

    info!("Bot stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
