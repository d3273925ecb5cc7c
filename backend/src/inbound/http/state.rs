//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data`, so they depend
//! only on domain ports and stay testable with mock implementations.

use std::sync::Arc;

use crate::domain::ports::{
    AccessGate, CartCommand, CartQuery, CatalogCommand, CatalogQuery, CheckoutCommand,
    OrderCommand, OrderQuery, SalesQuery, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Customer-facing catalog reads.
    pub catalog: Arc<dyn CatalogQuery>,
    /// Admin catalog writes.
    pub catalog_admin: Arc<dyn CatalogCommand>,
    /// Cart reads.
    pub cart: Arc<dyn CartQuery>,
    /// Cart mutations.
    pub cart_commands: Arc<dyn CartCommand>,
    /// The checkout use case.
    pub checkout: Arc<dyn CheckoutCommand>,
    /// Order reads, customer and admin.
    pub orders: Arc<dyn OrderQuery>,
    /// Admin order status updates.
    pub order_commands: Arc<dyn OrderCommand>,
    /// Sales analytics.
    pub sales: Arc<dyn SalesQuery>,
    /// Admin access decisions.
    pub access: Arc<dyn AccessGate>,
    /// Admin user directory listing.
    pub users: Arc<dyn UsersQuery>,
}
