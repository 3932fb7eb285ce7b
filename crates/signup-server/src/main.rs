mod config;
mod handlers;

use anyhow::{Context, Result};
use config::Config;
use handlers::{router, AppState};
use signup_validation::RuleSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load_default().context("Failed to load configuration")?;
    info!(profile = %config.validation.profile, "signup-server starting");

    let app = router(AppState::new(RuleSet::for_profile(config.validation.profile)));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
