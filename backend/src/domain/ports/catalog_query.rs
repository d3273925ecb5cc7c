//! Driving port for customer-facing catalog reads.
//!
//! Inbound adapters (HTTP handlers) use this port to browse the catalog
//! without importing outbound persistence concerns.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::catalog::{Category, Product, ProductFilter};
use crate::domain::Error;

/// Domain use-case port for browsing products and categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// List products matching the filter, one page at a time.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageParams,
    ) -> Result<Page<Product>, Error>;

    /// Fetch a single product by id.
    ///
    /// Customer-facing callers set `active_only` so deactivated products
    /// read as absent; admin callers clear it to inspect any row.
    async fn get_product(&self, product_id: i32, active_only: bool) -> Result<Product, Error>;

    /// List every category.
    async fn list_categories(&self) -> Result<Vec<Category>, Error>;
}
