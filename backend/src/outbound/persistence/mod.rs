//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! The adapters stay thin: they translate between Diesel row structs and
//! domain entities and map driver errors into port error types. Business
//! rules live in the domain; the one exception is the checkout transaction,
//! where the adapter brackets the pure pricing core with row locks and the
//! writes that must commit atomically.

mod diesel_cart_repository;
mod diesel_catalog_repository;
mod diesel_error;
mod diesel_order_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_cart_repository::DieselCartRepository;
pub use diesel_catalog_repository::DieselCatalogRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
