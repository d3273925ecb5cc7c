//! Driving port for admin catalog writes.

use async_trait::async_trait;

use crate::domain::catalog::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductPatch,
};
use crate::domain::Error;

/// Domain use-case port for creating and maintaining catalog entries.
///
/// Payload validation (blank names, negative prices or stock) happens behind
/// this port so every adapter gets the same rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Create a product after validating the draft and its category.
    async fn create_product(&self, draft: NewProduct) -> Result<Product, Error>;

    /// Apply a partial update to a product.
    async fn update_product(&self, product_id: i32, patch: ProductPatch)
        -> Result<Product, Error>;

    /// Soft-delete a product by clearing its active flag.
    async fn deactivate_product(&self, product_id: i32) -> Result<(), Error>;

    /// Create a category after validating the draft.
    async fn create_category(&self, draft: NewCategory) -> Result<Category, Error>;

    /// Apply a partial update to a category.
    async fn update_category(
        &self,
        category_id: i32,
        patch: CategoryPatch,
    ) -> Result<Category, Error>;
}
