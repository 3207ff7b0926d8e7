mod catalog;
mod extract;
mod fetcher;
mod generator;
mod models;
mod routes;
mod snapshot;
mod validation;

use anyhow::Context;
use routes::{router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::fetcher::{HttpFetcher, DEFAULT_USER_AGENT};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let user_agent = std::env::var("LAUNCH_KIT_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.into());
    tracing::info!("Outbound user agent: {}", user_agent);
    let fetcher = HttpFetcher::new(&user_agent).context("building HTTP client")?;
    let state = AppState { fetcher: Arc::new(fetcher) };

    let app = router(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0,0,0,0], port));
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
