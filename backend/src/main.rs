//! Users service entry point: loads settings, migrates the store and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_service::inbound::http::health::HealthState;
use users_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use users_service::settings::ServiceSettings;

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!(error = %err, "{context}");
    std::io::Error::other(format!("{context}: {err}"))
}

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

    let settings =
        ServiceSettings::load().map_err(|err| startup_error("failed to load settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("invalid settings", err))?;
    let database_url = settings.database_url();

    run_pending_migrations(database_url)
        .await
        .map_err(|err| startup_error("database migration failed", err))?;

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.max_connections()))
        .await
        .map_err(|err| startup_error("database pool unavailable", err))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, pool))?;
    let result = server.await;
    health_state.mark_draining();
    result
}
