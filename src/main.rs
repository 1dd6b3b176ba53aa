use anyhow::{Context, Result};
use banner_relay::config::Config;
use banner_relay::server::{router, AppState};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let config = Config::parse();

    info!(model = %config.gemini_model, font = %config.font_family, "banner relay starting");
    info!("figma api: {}", config.figma_api_base);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!("listening on http://{}", listener.local_addr()?);

    let app = router(AppState::new(config));
    axum::serve(listener, app).await?;

    Ok(())
}
