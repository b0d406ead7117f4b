//! Backend entry-point: wires REST endpoints, the preview surface, and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use playforge_backend::api::health::HealthState;
use playforge_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("configuration load failed: {e}")))?;
    let mut config = ServerConfig::from_settings(&settings)
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url)).await.map_err(|e| {
                std::io::Error::other(format!("database pool construction failed: {e}"))
            })?;
            run_pending_migrations(url)
                .await
                .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; serving fixture data"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting server");
    create_server(health_state, config)?.await
}
