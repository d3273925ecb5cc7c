//! Catalog entities: products and categories.
//!
//! Products carry a fixed-point price (`BigDecimal`, two decimal places)
//! and a soft-delete flag. Inactive products stay in storage so historical
//! order items keep a valid product reference; they are simply hidden from
//! customer-facing listings.

use bigdecimal::{BigDecimal, Signed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of decimal places used for prices.
pub const PRICE_SCALE: i64 = 2;

/// A catalog category. Owns zero or more products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Primary key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A catalog product, including the denormalised category name for reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Primary key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Unit price with two decimal places.
    #[schema(value_type = String, example = "19.99")]
    pub price: BigDecimal,
    /// Owning category, when assigned.
    pub category_id: Option<i32>,
    /// Name of the owning category, resolved at read time.
    pub category_name: Option<String>,
    /// Units currently in stock. Never negative.
    pub stock_quantity: i32,
    /// Optional image location.
    pub image_url: Option<String>,
    /// Soft-delete flag; inactive products are hidden from customers.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validation failures for catalog write payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    /// Product or category name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Price was negative.
    #[error("price must not be negative")]
    NegativePrice,
    /// Stock quantity was negative.
    #[error("stock quantity must not be negative")]
    NegativeStock,
}

/// Validated payload for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Display name, non-blank.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Non-negative price, normalised to two decimal places.
    pub price: BigDecimal,
    /// Required owning category; existence is checked by the service.
    pub category_id: i32,
    /// Initial stock level, non-negative.
    pub stock_quantity: i32,
    /// Optional image location.
    pub image_url: Option<String>,
    /// Whether the product is immediately visible to customers.
    pub is_active: bool,
}

impl NewProduct {
    /// Validate field-level invariants and normalise the price scale.
    pub fn validated(mut self) -> Result<Self, CatalogValidationError> {
        if self.name.trim().is_empty() {
            return Err(CatalogValidationError::EmptyName);
        }
        if self.price.is_negative() {
            return Err(CatalogValidationError::NegativePrice);
        }
        if self.stock_quantity < 0 {
            return Err(CatalogValidationError::NegativeStock);
        }
        self.name = self.name.trim().to_owned();
        self.price = normalise_price(&self.price);
        Ok(self)
    }
}

/// Patch-style update for a product: only `Some` fields mutate state.
///
/// `description`, `category_id`, and `image_url` use a double `Option` so a
/// patch can distinguish "leave untouched" (`None`) from "clear the value"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// Replacement price.
    pub price: Option<BigDecimal>,
    /// Replacement category reference, or `Some(None)` to detach.
    pub category_id: Option<Option<i32>>,
    /// Replacement stock level.
    pub stock_quantity: Option<i32>,
    /// Replacement image location, or `Some(None)` to clear it.
    pub image_url: Option<Option<String>>,
    /// Replacement visibility flag.
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// True when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate field-level invariants and normalise the price scale.
    pub fn validated(mut self) -> Result<Self, CatalogValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CatalogValidationError::EmptyName);
            }
        }
        if let Some(price) = &self.price {
            if price.is_negative() {
                return Err(CatalogValidationError::NegativePrice);
            }
        }
        if matches!(self.stock_quantity, Some(stock) if stock < 0) {
            return Err(CatalogValidationError::NegativeStock);
        }
        self.name = self.name.map(|name| name.trim().to_owned());
        self.price = self.price.map(|price| normalise_price(&price));
        Ok(self)
    }
}

/// Validated payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Display name, non-blank.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl NewCategory {
    /// Validate field-level invariants.
    pub fn validated(mut self) -> Result<Self, CatalogValidationError> {
        if self.name.trim().is_empty() {
            return Err(CatalogValidationError::EmptyName);
        }
        self.name = self.name.trim().to_owned();
        Ok(self)
    }
}

/// Patch-style update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
}

impl CategoryPatch {
    /// Validate field-level invariants.
    pub fn validated(mut self) -> Result<Self, CatalogValidationError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(CatalogValidationError::EmptyName);
            }
        }
        self.name = self.name.map(|name| name.trim().to_owned());
        Ok(self)
    }
}

/// Filters applied to product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict to a single category.
    pub category_id: Option<i32>,
    /// Case-sensitive substring match on the product name.
    pub search: Option<String>,
    /// When true, only `is_active` products are returned. Customer-facing
    /// listings always set this; admin listings never do.
    pub active_only: bool,
}

/// Rescale a price to exactly [`PRICE_SCALE`] decimal places.
pub fn normalise_price(price: &BigDecimal) -> BigDecimal {
    price.with_scale_round(PRICE_SCALE, bigdecimal::RoundingMode::HalfUp)
}
