//! Driving port for the checkout use case.

use async_trait::async_trait;

use crate::domain::order::Order;
use crate::domain::Error;

/// Domain use-case port for converting the cart into an order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutCommand: Send + Sync {
    /// Place an order from the user's current cart, all-or-nothing.
    async fn checkout(&self, user_id: i32, shipping_address: String) -> Result<Order, Error>;
}
