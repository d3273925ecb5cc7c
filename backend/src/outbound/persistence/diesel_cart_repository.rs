//! PostgreSQL-backed `CartRepository` implementation using Diesel.
//!
//! Cart rows are read through a left join on products so a hard-removed
//! product surfaces as a line without product data instead of an error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::cart::CartLine;
use crate::domain::ports::{CartRepository, CartRepositoryError};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::models::{CartItemRow, NewCartItemRow, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cart_items, products};

/// Diesel-backed implementation of the cart repository port.
#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CartRepositoryError {
    map_pool_error(error, CartRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> CartRepositoryError {
    map_diesel_error(
        error,
        CartRepositoryError::query,
        CartRepositoryError::connection,
    )
}

fn into_line((row, product): (CartItemRow, Option<ProductRow>)) -> CartLine {
    row.into_cart_line(product)
}

#[async_trait]
impl CartRepository for DieselCartRepository {
    async fn list_lines(&self, user_id: i32) -> Result<Vec<CartLine>, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(CartItemRow, Option<ProductRow>)> = cart_items::table
            .left_join(products::table)
            .filter(cart_items::user_id.eq(user_id))
            .order(cart_items::id.asc())
            .select((CartItemRow::as_select(), Option::<ProductRow>::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(into_line).collect())
    }

    async fn find_line(
        &self,
        user_id: i32,
        item_id: i32,
    ) -> Result<Option<CartLine>, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<(CartItemRow, Option<ProductRow>)> = cart_items::table
            .left_join(products::table)
            .filter(cart_items::id.eq(item_id))
            .filter(cart_items::user_id.eq(user_id))
            .select((CartItemRow::as_select(), Option::<ProductRow>::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(into_line))
    }

    async fn find_line_for_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Option<CartLine>, CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row: Option<(CartItemRow, Option<ProductRow>)> = cart_items::table
            .left_join(products::table)
            .filter(cart_items::user_id.eq(user_id))
            .filter(cart_items::product_id.eq(product_id))
            .select((CartItemRow::as_select(), Option::<ProductRow>::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(into_line))
    }

    async fn upsert_line(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(cart_items::table)
            .values(&NewCartItemRow {
                user_id,
                product_id,
                quantity,
            })
            .on_conflict((cart_items::user_id, cart_items::product_id))
            .do_update()
            .set(cart_items::quantity.eq(quantity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn set_quantity(
        &self,
        item_id: i32,
        quantity: i32,
    ) -> Result<(), CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::update(cart_items::table.find(item_id))
            .set(cart_items::quantity.eq(quantity))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn delete_line(&self, item_id: i32) -> Result<(), CartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::delete(cart_items::table.find(item_id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(error, CartRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let error = map_diesel(diesel::result::Error::NotFound);
        assert!(matches!(error, CartRepositoryError::Query { .. }));
    }
}
