//! Driving port for the sales analytics report.

use async_trait::async_trait;

use crate::domain::analytics::{DateRange, SalesReport};
use crate::domain::Error;

/// Domain use-case port for aggregating sales figures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalesQuery: Send + Sync {
    /// Build the sales report for the given period.
    async fn sales_report(&self, range: DateRange) -> Result<SalesReport, Error>;
}
