//! Driving port for reading a user's cart.

use async_trait::async_trait;

use crate::domain::cart::Cart;
use crate::domain::Error;

/// Domain use-case port for viewing the cart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartQuery: Send + Sync {
    /// Load the user's cart with live product data and a running total.
    async fn view_cart(&self, user_id: i32) -> Result<Cart, Error>;
}
