//! Domain entities, services, and the port boundary.
//!
//! Purpose: define strongly typed storefront entities (catalog, cart,
//! orders), the pure checkout and analytics cores, and the driving/driven
//! ports that keep HTTP and persistence concerns outside the domain.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic error payload and codes.
//! - catalog / cart / checkout / order / analytics — entity modules.
//! - ports — hexagonal boundary traits.
//! - the `*Service` types — production implementations of the driving ports.

pub mod access;
pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod order;
pub mod ports;
pub mod user;

mod analytics_service;
mod cart_service;
mod catalog_service;
mod directory_service;
mod order_service;

pub use self::access::AccessDecision;
pub use self::analytics_service::AnalyticsService;
pub use self::cart_service::CartService;
pub use self::catalog_service::CatalogService;
pub use self::directory_service::UserDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::order_service::OrderService;
pub use self::user::User;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
