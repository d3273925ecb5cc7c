//! Driving port for cart mutations.

use async_trait::async_trait;

use crate::domain::Error;

/// Domain use-case port for changing the cart's contents.
///
/// Quantities are validated against live stock on the way in; checkout
/// re-validates under row locks, so these checks are a user-experience
/// guard rather than the source of truth.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartCommand: Send + Sync {
    /// Add `quantity` units of a product, merging with any existing line.
    async fn add_item(&self, user_id: i32, product_id: i32, quantity: i32) -> Result<(), Error>;

    /// Set the quantity on an existing line; zero or less removes it.
    async fn update_item(&self, user_id: i32, item_id: i32, quantity: i32) -> Result<(), Error>;

    /// Remove a line from the cart.
    async fn remove_item(&self, user_id: i32, item_id: i32) -> Result<(), Error>;
}
