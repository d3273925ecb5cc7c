//! Sales analytics aggregation.
//!
//! A point-in-time, read-only summary over orders in a date range. The
//! repository loads matching orders and their items; [`summarise_sales`]
//! does the arithmetic, so divide-by-zero guards and tie-breaking are
//! unit-testable without a database.

use std::collections::BTreeMap;
use std::collections::HashMap;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{normalise_price, PRICE_SCALE};
use super::order::OrderStatus;

/// Maximum number of products reported in the top-sellers list.
pub const TOP_PRODUCT_LIMIT: usize = 10;

/// Inclusive creation-time bounds for the aggregation window.
///
/// Either bound may be absent. Date-only query values are expanded by the
/// HTTP layer so an end date covers its whole day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest order creation time included.
    pub start: Option<DateTime<Utc>>,
    /// Latest order creation time included.
    pub end: Option<DateTime<Utc>>,
}

/// Order fields the aggregation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesOrder {
    /// Current order status.
    pub status: OrderStatus,
    /// Frozen order total.
    pub total_amount: BigDecimal,
}

/// Order item fields the aggregation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesItem {
    /// Referenced product id.
    pub product_id: i32,
    /// Product name when the product row still exists.
    pub product_name: Option<String>,
    /// Purchased quantity.
    pub quantity: i32,
    /// Frozen unit price.
    pub price: BigDecimal,
}

/// Revenue and volume for one product in the top-sellers list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopProduct {
    /// Product display name, or `Product {id}` when the row is gone.
    pub name: String,
    /// Total units sold in the window.
    pub quantity: i64,
    /// Total revenue in the window.
    #[schema(value_type = String, example = "199.90")]
    pub revenue: BigDecimal,
}

/// Aggregated sales figures for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesReport {
    /// Number of orders in the window.
    pub total_orders: i64,
    /// Sum of frozen order totals.
    #[schema(value_type = String, example = "1024.50")]
    pub total_revenue: BigDecimal,
    /// `total_revenue / total_orders`, zero when there are no orders.
    #[schema(value_type = String, example = "20.49")]
    pub average_order_value: BigDecimal,
    /// Order count per status, keyed by the stable status string.
    pub orders_by_status: BTreeMap<String, i64>,
    /// Top products by revenue, descending, ties by encounter order.
    pub top_products: Vec<TopProduct>,
}

/// Aggregate orders and their items into a [`SalesReport`].
///
/// `items` must belong to the same window as `orders`; encounter order of
/// items drives the tie-break between products with equal revenue.
pub fn summarise_sales(orders: &[SalesOrder], items: &[SalesItem]) -> SalesReport {
    let total_orders = orders.len() as i64;
    let total_revenue = orders
        .iter()
        .fold(BigDecimal::zero(), |acc, order| acc + &order.total_amount);

    let average_order_value = if total_orders == 0 {
        BigDecimal::zero().with_scale(PRICE_SCALE)
    } else {
        normalise_price(&(&total_revenue / BigDecimal::from(total_orders)))
    };

    let mut orders_by_status = BTreeMap::new();
    for order in orders {
        *orders_by_status
            .entry(order.status.as_str().to_owned())
            .or_insert(0_i64) += 1;
    }

    // Accumulate per-product figures in encounter order; the stable sort
    // below then keeps that order for revenue ties.
    let mut product_index: HashMap<String, usize> = HashMap::new();
    let mut products: Vec<TopProduct> = Vec::new();
    for item in items {
        let name = item
            .product_name
            .clone()
            .unwrap_or_else(|| format!("Product {}", item.product_id));
        let revenue = &item.price * BigDecimal::from(item.quantity);
        let index = *product_index.entry(name.clone()).or_insert_with(|| {
            products.push(TopProduct {
                name,
                quantity: 0,
                revenue: BigDecimal::zero(),
            });
            products.len() - 1
        });
        let entry = &mut products[index];
        entry.quantity += i64::from(item.quantity);
        entry.revenue += revenue;
    }

    products.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    products.truncate(TOP_PRODUCT_LIMIT);

    SalesReport {
        total_orders,
        total_revenue,
        average_order_value,
        orders_by_status,
        top_products: products,
    }
}
