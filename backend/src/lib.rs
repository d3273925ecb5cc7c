//! Storefront backend: catalog, cart, checkout, orders, and admin APIs.
//!
//! The crate follows a hexagonal layout. `domain` holds the entities,
//! services, and ports; `inbound::http` adapts Actix requests onto the
//! driving ports; `outbound::persistence` implements the driven ports with
//! Diesel over PostgreSQL; `server` wires the layers together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
