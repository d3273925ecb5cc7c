//! Catalog domain services.
//!
//! One service implements both catalog driving ports: the customer-facing
//! read side and the admin write side share the same repository and error
//! mapping.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageParams};

use crate::domain::catalog::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductFilter, ProductPatch,
};
use crate::domain::ports::{
    CatalogCommand, CatalogQuery, ProductRepository, ProductRepositoryError,
};
use crate::domain::Error;

fn map_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

/// Catalog service implementing the query and command driving ports.
#[derive(Clone)]
pub struct CatalogService<R> {
    product_repo: Arc<R>,
}

impl<R> CatalogService<R> {
    /// Create a new catalog service with the product repository.
    pub fn new(product_repo: Arc<R>) -> Self {
        Self { product_repo }
    }
}

impl<R> CatalogService<R>
where
    R: ProductRepository,
{
    async fn require_category(&self, category_id: i32) -> Result<(), Error> {
        let category = self
            .product_repo
            .find_category(category_id)
            .await
            .map_err(map_repository_error)?;
        if category.is_none() {
            return Err(Error::not_found(format!(
                "category {category_id} does not exist"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> CatalogQuery for CatalogService<R>
where
    R: ProductRepository,
{
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageParams,
    ) -> Result<Page<Product>, Error> {
        self.product_repo
            .list_products(&filter, page)
            .await
            .map_err(map_repository_error)
    }

    async fn get_product(&self, product_id: i32, active_only: bool) -> Result<Product, Error> {
        let product = self
            .product_repo
            .find_product(product_id)
            .await
            .map_err(map_repository_error)?
            .filter(|product| product.is_active || !active_only)
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;
        Ok(product)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        self.product_repo
            .list_categories()
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> CatalogCommand for CatalogService<R>
where
    R: ProductRepository,
{
    async fn create_product(&self, draft: NewProduct) -> Result<Product, Error> {
        let draft = draft
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.require_category(draft.category_id).await?;
        self.product_repo
            .insert_product(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update_product(
        &self,
        product_id: i32,
        patch: ProductPatch,
    ) -> Result<Product, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }
        let patch = patch
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if let Some(Some(category_id)) = patch.category_id {
            self.require_category(category_id).await?;
        }
        self.product_repo
            .update_product(product_id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))
    }

    async fn deactivate_product(&self, product_id: i32) -> Result<(), Error> {
        let deactivated = self
            .product_repo
            .deactivate_product(product_id)
            .await
            .map_err(map_repository_error)?;
        if !deactivated {
            return Err(Error::not_found(format!("product {product_id} not found")));
        }
        Ok(())
    }

    async fn create_category(&self, draft: NewCategory) -> Result<Category, Error> {
        let draft = draft
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.product_repo
            .insert_category(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update_category(
        &self,
        category_id: i32,
        patch: CategoryPatch,
    ) -> Result<Category, Error> {
        if patch == CategoryPatch::default() {
            return Err(Error::invalid_request("no fields to update"));
        }
        let patch = patch
            .validated()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.product_repo
            .update_category(category_id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("category {category_id} not found")))
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
