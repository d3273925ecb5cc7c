//! Port abstraction for cart persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::cart::CartLine;

/// Persistence errors raised by cart repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartRepositoryError {
    /// Repository connection could not be established.
    #[error("cart repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("cart repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl CartRepositoryError {
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

/// Storage port for cart rows.
///
/// Every lookup is scoped by `user_id` so one user can never observe or
/// mutate another user's cart rows; a foreign item id behaves exactly like
/// a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Load all of a user's cart lines joined with live product data.
    async fn list_lines(&self, user_id: i32) -> Result<Vec<CartLine>, CartRepositoryError>;

    /// Fetch a single cart line by `(item_id, user_id)`.
    async fn find_line(
        &self,
        user_id: i32,
        item_id: i32,
    ) -> Result<Option<CartLine>, CartRepositoryError>;

    /// Fetch the line a user holds for a given product, if any.
    async fn find_line_for_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartLine>, CartRepositoryError>;

    /// Insert or replace the `(user_id, product_id)` row with `quantity`.
    async fn upsert_line(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), CartRepositoryError>;

    /// Set the quantity on an existing line.
    async fn set_quantity(&self, item_id: i32, quantity: i32)
        -> Result<(), CartRepositoryError>;

    /// Delete a line.
    async fn delete_line(&self, item_id: i32) -> Result<(), CartRepositoryError>;
}
