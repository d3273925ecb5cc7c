//! Port abstraction for order persistence adapters, including the
//! transactional checkout boundary.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::analytics::{DateRange, SalesItem, SalesOrder};
use crate::domain::checkout::CheckoutRejection;
use crate::domain::order::{Order, OrderFilter, OrderStatus};

/// Persistence errors raised by order repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRepositoryError {
    /// Repository connection could not be established.
    #[error("order repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("order repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl OrderRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Failure modes of the checkout transaction.
///
/// A rejection is a business outcome decided by the domain pricing step;
/// a repository error is a storage fault. Both roll the transaction back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// Checkout was rejected by cart/stock validation.
    #[error(transparent)]
    Rejected(#[from] CheckoutRejection),
    /// The underlying storage failed.
    #[error(transparent)]
    Repository(#[from] OrderRepositoryError),
}

/// Storage port for orders, the checkout transaction, and sales reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Convert the user's cart into an order, all-or-nothing.
    ///
    /// Implementations must, within one transaction: lock the referenced
    /// product rows, validate and price the cart, insert the order and its
    /// items with snapshot prices, decrement stock, and clear the cart.
    /// Any failure leaves no trace.
    async fn place_order(
        &self,
        user_id: i32,
        shipping_address: &str,
    ) -> Result<Order, CheckoutError>;

    /// List a user's orders with items, newest first.
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>, OrderRepositoryError>;

    /// Fetch an order by `(order_id, user_id)`; foreign orders read as absent.
    async fn find_for_user(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// List all orders, optionally filtered by status, newest first.
    async fn list_all(
        &self,
        filter: OrderFilter,
        page: PageParams,
    ) -> Result<Page<Order>, OrderRepositoryError>;

    /// Fetch any order by id with its items.
    async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, OrderRepositoryError>;

    /// Update an order's status; `None` when the order does not exist.
    async fn set_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<Option<Order>, OrderRepositoryError>;

    /// Load the orders and items needed by the sales aggregation.
    async fn load_sales(
        &self,
        range: DateRange,
    ) -> Result<(Vec<SalesOrder>, Vec<SalesItem>), OrderRepositoryError>;
}
