//! Backend entry-point: configuration, migrations, and the HTTP listener.

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::DbPool;
use backend::server::{build_http_state, create_server, run_migrations, ServerConfig};

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

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    run_migrations(&config.database_url).await?;

    let pool = DbPool::new(config.pool_config())
        .await
        .map_err(std::io::Error::other)?;
    let http_state = build_http_state(pool);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, &config)?;
    server.await
}
