//! Port abstraction for catalog persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::catalog::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductFilter, ProductPatch,
};

/// Persistence errors raised by catalog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductRepositoryError {
    /// Repository connection could not be established.
    #[error("catalog repository connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("catalog repository query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl ProductRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Storage port for products and categories.
///
/// Update operations return `None` when the target row does not exist so
/// services can translate that into a 404 without a separate lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products matching the filter, newest first, one page at a time.
    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageParams,
    ) -> Result<Page<Product>, ProductRepositoryError>;

    /// Fetch a product by id, regardless of its active flag.
    async fn find_product(&self, product_id: i32)
        -> Result<Option<Product>, ProductRepositoryError>;

    /// Insert a new product and return the stored row.
    async fn insert_product(&self, product: &NewProduct)
        -> Result<Product, ProductRepositoryError>;

    /// Apply a patch to a product; `None` when the product does not exist.
    async fn update_product(
        &self,
        product_id: i32,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError>;

    /// Soft-delete a product; `false` when the product does not exist.
    async fn deactivate_product(&self, product_id: i32) -> Result<bool, ProductRepositoryError>;

    /// List every category.
    async fn list_categories(&self) -> Result<Vec<Category>, ProductRepositoryError>;

    /// Fetch a category by id.
    async fn find_category(
        &self,
        category_id: i32,
    ) -> Result<Option<Category>, ProductRepositoryError>;

    /// Insert a new category and return the stored row.
    async fn insert_category(
        &self,
        category: &NewCategory,
    ) -> Result<Category, ProductRepositoryError>;

    /// Apply a patch to a category; `None` when the category does not exist.
    async fn update_category(
        &self,
        category_id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, ProductRepositoryError>;
}
