//! Server construction: pool, migrations, service wiring, and the listener.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    AnalyticsService, CartService, CatalogService, OrderService, UserDirectoryService,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::{self, HttpState};
use crate::middleware::Trace;
use crate::outbound::persistence::{
    DbPool, DieselCartRepository, DieselCatalogRepository, DieselOrderRepository,
    DieselUserRepository,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations before the server accepts traffic.
///
/// Runs on a blocking thread with a dedicated synchronous connection; the
/// async pool is only built afterwards.
pub async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|err| format!("database connection failed: {err}"))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| format!("migration failed: {err}"))
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task panicked: {err}")))?
    .map_err(std::io::Error::other)?;

    info!(applied, "migrations up to date");
    Ok(())
}

/// Wire the Diesel repositories and domain services into an [`HttpState`].
pub fn build_http_state(pool: DbPool) -> HttpState {
    let catalog_repo = Arc::new(DieselCatalogRepository::new(pool.clone()));
    let cart_repo = Arc::new(DieselCartRepository::new(pool.clone()));
    let order_repo = Arc::new(DieselOrderRepository::new(pool.clone()));
    let user_repo = Arc::new(DieselUserRepository::new(pool));

    let catalog = Arc::new(CatalogService::new(catalog_repo.clone()));
    let cart = Arc::new(CartService::new(cart_repo, catalog_repo));
    let orders = Arc::new(OrderService::new(order_repo.clone()));
    let analytics = Arc::new(AnalyticsService::new(order_repo));
    let directory = Arc::new(UserDirectoryService::new(user_repo));

    HttpState {
        catalog: catalog.clone(),
        catalog_admin: catalog,
        cart: cart.clone(),
        cart_commands: cart,
        checkout: orders.clone(),
        orders: orders.clone(),
        order_commands: orders,
        sales: analytics,
        access: directory.clone(),
        users: directory,
    }
}

/// Construct the HTTP server from a ready connection pool.
///
/// The caller runs migrations first and marks `health_state` ready once the
/// returned server has bound its listener.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .configure(http::configure)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
