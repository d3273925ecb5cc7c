//! Order domain services: checkout, order reads, and status updates.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::order::{Order, OrderFilter, OrderStatus};
use crate::domain::ports::{
    CheckoutCommand, CheckoutError, OrderCommand, OrderQuery, OrderRepository,
    OrderRepositoryError,
};
use crate::domain::Error;

fn map_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
    }
}

fn map_checkout_error(error: CheckoutError) -> Error {
    match error {
        CheckoutError::Rejected(rejection) => rejection.into(),
        CheckoutError::Repository(error) => map_repository_error(error),
    }
}

/// Order service implementing checkout and the order driving ports.
#[derive(Clone)]
pub struct OrderService<R> {
    order_repo: Arc<R>,
}

impl<R> OrderService<R> {
    /// Create a new order service with the order repository.
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }
}

#[async_trait]
impl<R> CheckoutCommand for OrderService<R>
where
    R: OrderRepository,
{
    async fn checkout(&self, user_id: i32, shipping_address: String) -> Result<Order, Error> {
        let shipping_address = shipping_address.trim().to_owned();
        if shipping_address.is_empty() {
            return Err(Error::invalid_request("shipping address is required"));
        }
        self.order_repo
            .place_order(user_id, &shipping_address)
            .await
            .map_err(map_checkout_error)
    }
}

#[async_trait]
impl<R> OrderQuery for OrderService<R>
where
    R: OrderRepository,
{
    async fn list_my_orders(&self, user_id: i32) -> Result<Vec<Order>, Error> {
        self.order_repo
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get_my_order(&self, user_id: i32, order_id: i32) -> Result<Order, Error> {
        self.order_repo
            .find_for_user(user_id, order_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {order_id} not found")))
    }

    async fn list_all_orders(
        &self,
        filter: OrderFilter,
        page: PageParams,
    ) -> Result<Page<Order>, Error> {
        self.order_repo
            .list_all(filter, page)
            .await
            .map_err(map_repository_error)
    }

    async fn get_order(&self, order_id: i32) -> Result<Order, Error> {
        self.order_repo
            .find_by_id(order_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {order_id} not found")))
    }
}

#[async_trait]
impl<R> OrderCommand for OrderService<R>
where
    R: OrderRepository,
{
    async fn update_status(&self, order_id: i32, status: &str) -> Result<Order, Error> {
        let status: OrderStatus = status.parse().map_err(|_| {
            let valid = OrderStatus::ALL.map(|status| status.as_str()).join(", ");
            Error::invalid_request(format!("invalid status; expected one of: {valid}"))
        })?;
        self.order_repo
            .set_status(order_id, status)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {order_id} not found")))
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
