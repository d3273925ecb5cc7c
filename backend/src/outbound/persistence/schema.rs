//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them
//! for compile-time query validation. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered users mirrored from the identity service.
    users (id) {
        /// Primary key, the subject asserted by the identity service.
        id -> Int4,
        /// Display handle, unique.
        username -> Varchar,
        /// Grants access to the admin surface.
        is_admin -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalog categories.
    categories (id) {
        /// Primary key.
        id -> Int4,
        /// Display name.
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalog products with fixed-point prices and a soft-delete flag.
    products (id) {
        /// Primary key.
        id -> Int4,
        /// Display name.
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Unit price, NUMERIC(10, 2).
        price -> Numeric,
        /// Owning category, nullable so categories can be detached.
        category_id -> Nullable<Int4>,
        /// Units in stock; a CHECK constraint keeps this non-negative.
        stock_quantity -> Int4,
        /// Optional image location.
        image_url -> Nullable<Varchar>,
        /// Soft-delete flag.
        is_active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user cart rows, unique per `(user_id, product_id)`.
    cart_items (id) {
        /// Primary key.
        id -> Int4,
        /// Owning user.
        user_id -> Int4,
        /// Referenced product.
        product_id -> Int4,
        /// Desired quantity, always positive.
        quantity -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Placed orders with totals frozen at checkout.
    orders (id) {
        /// Primary key.
        id -> Int4,
        /// Purchasing user.
        user_id -> Int4,
        /// Total captured at checkout, NUMERIC(10, 2).
        total_amount -> Numeric,
        /// Delivery address captured at checkout.
        shipping_address -> Text,
        /// Fulfilment status as its stable lowercase identifier.
        status -> Varchar,
        /// Placement timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Order line items with unit prices frozen at checkout.
    order_items (id) {
        /// Primary key.
        id -> Int4,
        /// Owning order.
        order_id -> Int4,
        /// Referenced product.
        product_id -> Int4,
        /// Purchased quantity.
        quantity -> Int4,
        /// Unit price snapshot, NUMERIC(10, 2).
        price -> Numeric,
    }
}

diesel::joinable!(products -> categories (category_id));
diesel::joinable!(cart_items -> users (user_id));
diesel::joinable!(cart_items -> products (product_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    categories,
    products,
    cart_items,
    orders,
    order_items,
);
