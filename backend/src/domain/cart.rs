//! Cart entities and the live-total computation.
//!
//! A cart is a per-user, transient set of `(product, quantity)` pairs. The
//! cart total always reflects live catalog prices; prices are only frozen
//! when checkout converts the cart into an order.

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Snapshot of the live product data a cart line needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartProduct {
    /// Product primary key.
    pub id: i32,
    /// Product display name.
    pub name: String,
    /// Live unit price.
    #[schema(value_type = String, example = "19.99")]
    pub price: BigDecimal,
    /// Live stock level.
    pub stock_quantity: i32,
    /// Live visibility flag.
    pub is_active: bool,
    /// Optional image location.
    pub image_url: Option<String>,
}

/// One cart row joined with its live product data.
///
/// `product` is `None` when the product row was hard-removed; such lines
/// contribute nothing to the total and fail checkout as unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    /// Cart item primary key.
    pub id: i32,
    /// Owning user; lines are only ever visible to this user.
    pub user_id: i32,
    /// Referenced product id.
    pub product_id: i32,
    /// Desired quantity, always positive while the row exists.
    pub quantity: i32,
    /// Live product data, when the product still exists.
    pub product: Option<CartProduct>,
}

impl CartLine {
    /// Live line total, zero when the product is gone.
    pub fn line_total(&self) -> BigDecimal {
        self.product
            .as_ref()
            .map(|product| &product.price * BigDecimal::from(self.quantity))
            .unwrap_or_else(BigDecimal::zero)
    }
}

/// A user's cart with its computed live total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    /// Cart lines in listing order.
    pub items: Vec<CartLine>,
    /// Sum of live line totals.
    #[schema(value_type = String, example = "39.98")]
    pub total_amount: BigDecimal,
}

impl Cart {
    /// Assemble a cart, computing the total from live prices.
    pub fn from_lines(items: Vec<CartLine>) -> Self {
        let total_amount = items
            .iter()
            .map(CartLine::line_total)
            .fold(BigDecimal::zero(), |acc, line| acc + line);
        Self {
            items,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for live total computation.
    use super::*;
    use rstest::rstest;

    fn line(id: i32, quantity: i32, price: &str) -> CartLine {
        CartLine {
            id,
            user_id: 1,
            product_id: id,
            quantity,
            product: Some(CartProduct {
                id,
                name: format!("Product {id}"),
                price: price.parse().expect("valid decimal"),
                stock_quantity: 100,
                is_active: true,
                image_url: None,
            }),
        }
    }

    #[rstest]
    fn empty_cart_totals_zero() {
        let cart = Cart::from_lines(Vec::new());
        assert_eq!(cart.total_amount, BigDecimal::zero());
        assert!(cart.items.is_empty());
    }

    #[rstest]
    fn total_sums_live_prices() {
        let cart = Cart::from_lines(vec![line(1, 2, "10.00"), line(2, 3, "0.50")]);
        assert_eq!(
            cart.total_amount,
            "21.50".parse::<BigDecimal>().expect("valid decimal")
        );
    }

    #[rstest]
    fn missing_product_contributes_nothing() {
        let mut orphan = line(3, 5, "99.99");
        orphan.product = None;
        let cart = Cart::from_lines(vec![line(1, 1, "1.00"), orphan]);
        assert_eq!(
            cart.total_amount,
            "1.00".parse::<BigDecimal>().expect("valid decimal")
        );
    }
}
