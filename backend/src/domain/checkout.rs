//! Checkout pricing and validation: the cart-to-order conversion core.
//!
//! [`price_cart`] is a pure function over cart lines joined with live
//! product data. The persistence adapter calls it *inside* the checkout
//! transaction, after locking the product rows, so the stock it validates
//! against cannot change before the decrement commits. Keeping it pure
//! makes every edge case unit-testable without a database.
//!
//! Validation runs up-front across all lines before anything is written:
//! a failure on the last line must not leave a partially-filled order.

use bigdecimal::{BigDecimal, Zero};
use serde_json::json;

use super::cart::CartLine;
use super::error::Error;

/// Why a checkout attempt was rejected.
///
/// Rejections are business outcomes, not storage failures: the surrounding
/// transaction rolls back, and the cart is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutRejection {
    /// The user's cart had no lines.
    #[error("cart is empty")]
    EmptyCart,
    /// A line references a product that is missing or inactive.
    #[error("product {product_id} is no longer available")]
    ProductUnavailable {
        /// The unavailable product's id.
        product_id: i32,
    },
    /// A line requests more units than the product has in stock.
    #[error("insufficient stock for {name}")]
    InsufficientStock {
        /// The product's id.
        product_id: i32,
        /// The product's display name.
        name: String,
        /// Units the cart asked for.
        requested: i32,
        /// Units actually in stock.
        available: i32,
    },
}

impl From<CheckoutRejection> for Error {
    fn from(rejection: CheckoutRejection) -> Self {
        let message = rejection.to_string();
        match rejection {
            CheckoutRejection::EmptyCart => Error::empty_cart(message),
            CheckoutRejection::ProductUnavailable { product_id } => {
                Error::product_unavailable(message)
                    .with_details(json!({ "productId": product_id }))
            }
            CheckoutRejection::InsufficientStock {
                product_id,
                requested,
                available,
                ..
            } => Error::insufficient_stock(message).with_details(json!({
                "productId": product_id,
                "requested": requested,
                "available": available,
            })),
        }
    }
}

/// One validated line ready to be frozen into an order item.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    /// Referenced product id.
    pub product_id: i32,
    /// Quantity to purchase and decrement from stock.
    pub quantity: i32,
    /// Unit price snapshot taken from the live product.
    pub unit_price: BigDecimal,
}

impl PricedLine {
    /// Snapshot price times quantity.
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// A fully validated cart priced for order creation.
///
/// ## Invariants
/// - `total_amount == Σ line.line_total()` over `lines`.
/// - `lines` preserves the cart's listing order.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedCart {
    /// Validated lines in cart listing order.
    pub lines: Vec<PricedLine>,
    /// Exact order total under fixed-point arithmetic.
    pub total_amount: BigDecimal,
}

/// Validate every cart line against live product state and price the order.
///
/// Lines are checked in listing order and the first failure wins. A line
/// whose product is missing or inactive rejects the whole checkout; so
/// does any line whose quantity exceeds the live stock.
///
/// # Examples
/// ```
/// use backend::domain::cart::{CartLine, CartProduct};
/// use backend::domain::checkout::price_cart;
///
/// let lines = vec![CartLine {
///     id: 1,
///     user_id: 1,
///     product_id: 7,
///     quantity: 3,
///     product: Some(CartProduct {
///         id: 7,
///         name: "Widget".into(),
///         price: "10.00".parse().unwrap(),
///         stock_quantity: 5,
///         is_active: true,
///         image_url: None,
///     }),
/// }];
/// let priced = price_cart(&lines).unwrap();
/// assert_eq!(priced.total_amount, "30.00".parse::<bigdecimal::BigDecimal>().unwrap());
/// ```
pub fn price_cart(lines: &[CartLine]) -> Result<PricedCart, CheckoutRejection> {
    if lines.is_empty() {
        return Err(CheckoutRejection::EmptyCart);
    }

    let mut priced = Vec::with_capacity(lines.len());
    let mut total_amount = BigDecimal::zero();

    for line in lines {
        let product = match &line.product {
            Some(product) if product.is_active => product,
            _ => {
                return Err(CheckoutRejection::ProductUnavailable {
                    product_id: line.product_id,
                })
            }
        };

        if product.stock_quantity < line.quantity {
            return Err(CheckoutRejection::InsufficientStock {
                product_id: product.id,
                name: product.name.clone(),
                requested: line.quantity,
                available: product.stock_quantity,
            });
        }

        let priced_line = PricedLine {
            product_id: product.id,
            quantity: line.quantity,
            unit_price: product.price.clone(),
        };
        total_amount += priced_line.line_total();
        priced.push(priced_line);
    }

    Ok(PricedCart {
        lines: priced,
        total_amount,
    })
}
