//! Order aggregate: orders, their items, and the status lifecycle.
//!
//! `total_amount` and each item's `price` are snapshots taken at checkout.
//! They are immutable afterwards and must never be recomputed from the
//! live catalog.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, payment settled, not yet picked.
    Pending,
    /// Order is being prepared for shipment.
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order received by the customer.
    Delivered,
    /// Order cancelled before delivery.
    Cancelled,
}

/// Error returned when parsing an unknown status value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid order status: {value}")]
pub struct InvalidOrderStatus {
    /// The rejected input.
    pub value: String,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stable lowercase identifier stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| InvalidOrderStatus {
                value: value.to_owned(),
            })
    }
}

/// A line item frozen into an order at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    /// Primary key.
    pub id: i32,
    /// Owning order.
    pub order_id: i32,
    /// Referenced product. The product row survives soft deletion, so this
    /// reference stays valid for historical orders.
    pub product_id: i32,
    /// Product name resolved at read time, for display.
    pub product_name: Option<String>,
    /// Purchased quantity.
    pub quantity: i32,
    /// Unit price snapshot taken at checkout. Never recomputed.
    #[schema(value_type = String, example = "19.99")]
    pub price: BigDecimal,
}

impl OrderItem {
    /// Line total: snapshot price times quantity.
    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Primary key.
    pub id: i32,
    /// Purchasing user.
    pub user_id: i32,
    /// Total captured at checkout; equals the sum of item line totals.
    #[schema(value_type = String, example = "59.97")]
    pub total_amount: BigDecimal,
    /// Delivery address captured at checkout.
    pub shipping_address: String,
    /// Current fulfilment status.
    pub status: OrderStatus,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
    /// Frozen line items.
    pub items: Vec<OrderItem>,
}

/// Status filter used by admin order listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    /// Restrict to a single status when set.
    pub status: Option<OrderStatus>,
}
