//! Driving port for order reads, covering both the customer and admin views.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::order::{Order, OrderFilter};
use crate::domain::Error;

/// Domain use-case port for reading orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// List the calling user's orders, newest first.
    async fn list_my_orders(&self, user_id: i32) -> Result<Vec<Order>, Error>;

    /// Fetch one of the calling user's orders; foreign orders read as absent.
    async fn get_my_order(&self, user_id: i32, order_id: i32) -> Result<Order, Error>;

    /// Admin view: list all orders, optionally filtered by status.
    async fn list_all_orders(
        &self,
        filter: OrderFilter,
        page: PageParams,
    ) -> Result<Page<Order>, Error>;

    /// Admin view: fetch any order by id.
    async fn get_order(&self, order_id: i32) -> Result<Order, Error>;
}
