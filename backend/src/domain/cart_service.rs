//! Cart domain services.
//!
//! The cart service validates quantities against live stock on the way in
//! so users learn about shortages while browsing, not at checkout. The
//! checkout transaction re-validates under row locks; these checks are a
//! courtesy, not the final word.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::cart::Cart;
use crate::domain::ports::{
    CartCommand, CartQuery, CartRepository, CartRepositoryError, ProductRepository,
    ProductRepositoryError,
};
use crate::domain::Error;

fn map_cart_error(error: CartRepositoryError) -> Error {
    match error {
        CartRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("cart repository unavailable: {message}"))
        }
        CartRepositoryError::Query { message } => {
            Error::internal(format!("cart repository error: {message}"))
        }
    }
}

fn map_product_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

fn insufficient_stock(name: &str, requested: i32, available: i32) -> Error {
    Error::insufficient_stock(format!("insufficient stock for {name}")).with_details(json!({
        "requested": requested,
        "available": available,
    }))
}

/// Cart service implementing the query and command driving ports.
#[derive(Clone)]
pub struct CartService<C, P> {
    cart_repo: Arc<C>,
    product_repo: Arc<P>,
}

impl<C, P> CartService<C, P> {
    /// Create a new cart service with its repositories.
    pub fn new(cart_repo: Arc<C>, product_repo: Arc<P>) -> Self {
        Self {
            cart_repo,
            product_repo,
        }
    }
}

#[async_trait]
impl<C, P> CartQuery for CartService<C, P>
where
    C: CartRepository,
    P: ProductRepository,
{
    async fn view_cart(&self, user_id: i32) -> Result<Cart, Error> {
        let lines = self
            .cart_repo
            .list_lines(user_id)
            .await
            .map_err(map_cart_error)?;
        Ok(Cart::from_lines(lines))
    }
}

#[async_trait]
impl<C, P> CartCommand for CartService<C, P>
where
    C: CartRepository,
    P: ProductRepository,
{
    async fn add_item(&self, user_id: i32, product_id: i32, quantity: i32) -> Result<(), Error> {
        if quantity <= 0 {
            return Err(Error::invalid_request("quantity must be positive"));
        }

        let product = self
            .product_repo
            .find_product(product_id)
            .await
            .map_err(map_product_error)?
            .filter(|product| product.is_active)
            .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;

        // Merge with any existing line so the stock check covers the whole
        // quantity the user would hold, not just the increment. Saturating
        // addition keeps absurd quantities on the stock-check path instead
        // of wrapping.
        let existing = self
            .cart_repo
            .find_line_for_product(user_id, product_id)
            .await
            .map_err(map_cart_error)?;
        let merged = existing
            .as_ref()
            .map_or(0, |line| line.quantity)
            .saturating_add(quantity);

        if merged > product.stock_quantity {
            return Err(insufficient_stock(
                &product.name,
                merged,
                product.stock_quantity,
            ));
        }

        self.cart_repo
            .upsert_line(user_id, product_id, merged)
            .await
            .map_err(map_cart_error)
    }

    async fn update_item(&self, user_id: i32, item_id: i32, quantity: i32) -> Result<(), Error> {
        let line = self
            .cart_repo
            .find_line(user_id, item_id)
            .await
            .map_err(map_cart_error)?
            .ok_or_else(|| Error::not_found(format!("cart item {item_id} not found")))?;

        if quantity <= 0 {
            return self
                .cart_repo
                .delete_line(line.id)
                .await
                .map_err(map_cart_error);
        }

        let product = line
            .product
            .as_ref()
            .filter(|product| product.is_active)
            .ok_or_else(|| {
                Error::product_unavailable(format!(
                    "product {} is no longer available",
                    line.product_id
                ))
            })?;

        if quantity > product.stock_quantity {
            return Err(insufficient_stock(
                &product.name,
                quantity,
                product.stock_quantity,
            ));
        }

        self.cart_repo
            .set_quantity(line.id, quantity)
            .await
            .map_err(map_cart_error)
    }

    async fn remove_item(&self, user_id: i32, item_id: i32) -> Result<(), Error> {
        let line = self
            .cart_repo
            .find_line(user_id, item_id)
            .await
            .map_err(map_cart_error)?
            .ok_or_else(|| Error::not_found(format!("cart item {item_id} not found")))?;
        self.cart_repo
            .delete_line(line.id)
            .await
            .map_err(map_cart_error)
    }
}

#[cfg(test)]
#[path = "cart_service_tests.rs"]
mod tests;
