//! Sales analytics domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::analytics::{summarise_sales, DateRange, SalesReport};
use crate::domain::ports::{OrderRepository, OrderRepositoryError, SalesQuery};
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

/// Analytics service implementing the sales query driving port.
#[derive(Clone)]
pub struct AnalyticsService<R> {
    order_repo: Arc<R>,
}

impl<R> AnalyticsService<R> {
    /// Create a new analytics service with the order repository.
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }
}

#[async_trait]
impl<R> SalesQuery for AnalyticsService<R>
where
    R: OrderRepository,
{
    async fn sales_report(&self, range: DateRange) -> Result<SalesReport, Error> {
        let (orders, items) = self
            .order_repo
            .load_sales(range)
            .await
            .map_err(map_repository_error)?;
        Ok(summarise_sales(&orders, &items))
    }
}
