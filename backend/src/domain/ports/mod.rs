//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters; driving ports (`*Query`, `*Command`, [`AccessGate`]) are
//! implemented by domain services and consumed by inbound HTTP handlers.

mod access_gate;
mod cart_command;
mod cart_query;
mod cart_repository;
mod catalog_command;
mod catalog_query;
mod checkout_command;
mod order_command;
mod order_query;
mod order_repository;
mod product_repository;
mod sales_query;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use access_gate::MockAccessGate;
pub use access_gate::AccessGate;
#[cfg(test)]
pub use cart_command::MockCartCommand;
pub use cart_command::CartCommand;
#[cfg(test)]
pub use cart_query::MockCartQuery;
pub use cart_query::CartQuery;
#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartRepository, CartRepositoryError};
#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use catalog_command::CatalogCommand;
#[cfg(test)]
pub use catalog_query::MockCatalogQuery;
pub use catalog_query::CatalogQuery;
#[cfg(test)]
pub use checkout_command::MockCheckoutCommand;
pub use checkout_command::CheckoutCommand;
#[cfg(test)]
pub use order_command::MockOrderCommand;
pub use order_command::OrderCommand;
#[cfg(test)]
pub use order_query::MockOrderQuery;
pub use order_query::OrderQuery;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{CheckoutError, OrderRepository, OrderRepositoryError};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
#[cfg(test)]
pub use sales_query::MockSalesQuery;
pub use sales_query::SalesQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
