use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use product_catalog::{api::create_router, application::builder::ApplicationBuilder, Config};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.is_json_logging() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    info!("Starting product catalog service");

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;
    info!(backend = %config.storage_backend, "Configuration loaded and validated");

    let listen_addr = config.listen_addr.clone();
    let state = ApplicationBuilder::new(config)
        .with_database()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("database initialization failed")?
        .with_infrastructure()
        .map_err(|e| anyhow::anyhow!(e))?
        .build()
        .map_err(|e| anyhow::anyhow!(e))?;

    let app = create_router(state);

    info!("Listening on {}", listen_addr);
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", listen_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
