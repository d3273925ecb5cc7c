//! PostgreSQL-backed `ProductRepository` implementation using Diesel.
//!
//! Products are read through a left join on categories so listings carry
//! the denormalised category name without a second query.

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageParams};

use crate::domain::catalog::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductFilter, ProductPatch,
};
use crate::domain::ports::{ProductRepository, ProductRepositoryError};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{
    CategoryChangeset, CategoryRow, NewCategoryRow, NewProductRow, ProductChangeset, ProductRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{categories, products};

/// Diesel-backed implementation of the catalog repository port.
#[derive(Clone)]
pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProductRepositoryError {
    map_pool_error(error, ProductRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ProductRepositoryError {
    map_diesel_error(
        error,
        ProductRepositoryError::query,
        ProductRepositoryError::connection,
    )
}

type ProductsJoin = diesel::dsl::LeftJoin<products::table, categories::table>;
type BoxedProducts<'a> = diesel::dsl::IntoBoxed<'a, ProductsJoin, Pg>;

/// Apply the listing filter to a fresh boxed products query.
fn filtered_products(filter: &ProductFilter) -> BoxedProducts<'_> {
    let mut query = products::table.left_join(categories::table).into_boxed();
    if let Some(category_id) = filter.category_id {
        query = query.filter(products::category_id.eq(category_id));
    }
    if let Some(search) = &filter.search {
        query = query.filter(products::name.like(format!("%{search}%")));
    }
    if filter.active_only {
        query = query.filter(products::is_active.eq(true));
    }
    query
}

fn product_changeset<'a>(patch: &'a ProductPatch) -> ProductChangeset<'a> {
    ProductChangeset {
        name: patch.name.as_deref(),
        description: patch.description.as_ref().map(Option::as_deref),
        price: patch.price.as_ref(),
        category_id: patch.category_id,
        stock_quantity: patch.stock_quantity,
        image_url: patch.image_url.as_ref().map(Option::as_deref),
        is_active: patch.is_active,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl ProductRepository for DieselCatalogRepository {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageParams,
    ) -> Result<Page<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let total: i64 = filtered_products(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let rows: Vec<(ProductRow, Option<String>)> = filtered_products(filter)
            .order((products::created_at.desc(), products::id.desc()))
            .offset(page.offset())
            .limit(page.limit())
            .select((ProductRow::as_select(), categories::name.nullable()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let items = rows
            .into_iter()
            .map(|(row, category_name)| row.into_product(category_name))
            .collect();
        Ok(Page::new(items, total, &page))
    }

    async fn find_product(
        &self,
        product_id: i32,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<(ProductRow, Option<String>)> = products::table
            .left_join(categories::table)
            .filter(products::id.eq(product_id))
            .select((ProductRow::as_select(), categories::name.nullable()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(|(row, category_name)| row.into_product(category_name)))
    }

    async fn insert_product(
        &self,
        product: &NewProduct,
    ) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&NewProductRow {
                name: &product.name,
                description: product.description.as_deref(),
                price: &product.price,
                category_id: Some(product.category_id),
                stock_quantity: product.stock_quantity,
                image_url: product.image_url.as_deref(),
                is_active: product.is_active,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let category_name = categories::table
            .filter(categories::id.eq(product.category_id))
            .select(categories::name)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.into_product(category_name))
    }

    async fn update_product(
        &self,
        product_id: i32,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<ProductRow> = diesel::update(products::table.find(product_id))
            .set(product_changeset(patch))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let category_name = match row.category_id {
            Some(category_id) => categories::table
                .filter(categories::id.eq(category_id))
                .select(categories::name)
                .first::<String>(&mut conn)
                .await
                .optional()
                .map_err(map_diesel)?,
            None => None,
        };

        Ok(Some(row.into_product(category_name)))
    }

    async fn deactivate_product(&self, product_id: i32) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let affected = diesel::update(products::table.find(product_id))
            .set((
                products::is_active.eq(false),
                products::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(affected > 0)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<CategoryRow> = categories::table
            .order(categories::name.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_category(
        &self,
        category_id: i32,
    ) -> Result<Option<Category>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<CategoryRow> = categories::table
            .find(category_id)
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Category::from))
    }

    async fn insert_category(
        &self,
        category: &NewCategory,
    ) -> Result<Category, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: CategoryRow = diesel::insert_into(categories::table)
            .values(&NewCategoryRow {
                name: &category.name,
                description: category.description.as_deref(),
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(row.into())
    }

    async fn update_category(
        &self,
        category_id: i32,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<CategoryRow> = diesel::update(categories::table.find(category_id))
            .set(CategoryChangeset {
                name: patch.name.as_deref(),
                description: patch.description.as_ref().map(Option::as_deref),
            })
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(Category::from))
    }
}
