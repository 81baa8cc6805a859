mod error;
mod routes;
mod state;

use anyhow::{Context, Result};
use climate_core::db;
use state::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("CLIMATE_DATABASE_URL"))
        .context("DATABASE_URL (or CLIMATE_DATABASE_URL) must point at the dataset file")?;
    let listen_addr =
        std::env::var("CLIMATE_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

    let pool = db::connect(&database_url).await?;
    db::verify_schema(&pool).await?;
    info!("dataset opened read-only at {}", database_url);

    let router = routes::app(AppState { pool });

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
