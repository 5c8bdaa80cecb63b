//! Backend entry-point: loads settings, prepares storage and serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shopping_list::api::health::HealthState;
use shopping_list::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use shopping_list::server::{ServerConfig, create_server};
use shopping_list::settings::ServerSettings;

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

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mut config = ServerConfig::from_settings(&settings);

    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(prepare_database(url).await?);
    }

    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "shopping list server listening");
    server.await
}

/// Apply pending migrations and open the connection pool.
async fn prepare_database(url: &str) -> std::io::Result<DbPool> {
    let migration_url = url.to_owned();
    tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(std::io::Error::other)?;

    DbPool::new(PoolConfig::new(url))
        .await
        .map_err(std::io::Error::other)
}
