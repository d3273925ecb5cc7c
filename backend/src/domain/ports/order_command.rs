//! Driving port for admin order mutations.

use async_trait::async_trait;

use crate::domain::order::Order;
use crate::domain::Error;

/// Domain use-case port for progressing orders through their lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommand: Send + Sync {
    /// Set an order's status from its textual form.
    ///
    /// Unknown status values are rejected before storage is touched.
    async fn update_status(&self, order_id: i32, status: &str) -> Result<Order, Error>;
}
