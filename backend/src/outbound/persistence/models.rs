//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! never exposed to the domain; adapters translate them into domain
//! entities at the boundary.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::cart::{CartLine, CartProduct};
use crate::domain::catalog::{Category, Product};
use crate::domain::user::User;

use super::schema::{cart_items, categories, order_items, orders, products, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            is_admin: row.is_admin,
            created_at: row.created_at,
        }
    }
}

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for creating category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Changeset struct for partial category updates.
///
/// Outer `None` skips the column; `Some(None)` writes NULL.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
}

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub category_id: Option<i32>,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Pair the row with its category name, resolved by the join.
    pub(crate) fn into_product(self, category_name: Option<String>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: self.category_id,
            category_name,
            stock_quantity: self.stock_quantity,
            image_url: self.image_url,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Insertable struct for creating product records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: &'a BigDecimal,
    pub category_id: Option<i32>,
    pub stock_quantity: i32,
    pub image_url: Option<&'a str>,
    pub is_active: bool,
}

/// Changeset struct for partial product updates.
///
/// Outer `None` skips the column; `Some(None)` writes NULL. `updated_at`
/// is always bumped by the adapter.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub price: Option<&'a BigDecimal>,
    pub category_id: Option<Option<i32>>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<Option<&'a str>>,
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the cart_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CartItemRow {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[expect(dead_code, reason = "schema field not surfaced in cart reads")]
    pub created_at: DateTime<Utc>,
}

impl CartItemRow {
    /// Pair the row with the joined product data, when the product exists.
    pub(crate) fn into_cart_line(self, product: Option<ProductRow>) -> CartLine {
        CartLine {
            id: self.id,
            user_id: self.user_id,
            product_id: self.product_id,
            quantity: self.quantity,
            product: product.map(|row| CartProduct {
                id: row.id,
                name: row.name,
                price: row.price,
                stock_quantity: row.stock_quantity,
                is_active: row.is_active,
                image_url: row.image_url,
            }),
        }
    }
}

/// Insertable struct for creating cart rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cart_items)]
pub(crate) struct NewCartItemRow {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: i32,
    pub user_id: i32,
    pub total_amount: BigDecimal,
    pub shipping_address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating order records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow<'a> {
    pub user_id: i32,
    pub total_amount: &'a BigDecimal,
    pub shipping_address: &'a str,
    pub status: &'a str,
}

/// Row struct for reading from the order_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderItemRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: BigDecimal,
}

/// Insertable struct for creating order item records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_items)]
pub(crate) struct NewOrderItemRow<'a> {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub price: &'a BigDecimal,
}
