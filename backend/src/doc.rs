//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the schemas they reference.
//! Swagger UI serves the generated document in debug builds at `/docs`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::analytics::{SalesReport, TopProduct};
use crate::domain::cart::{Cart, CartLine, CartProduct};
use crate::domain::catalog::{Category, Product};
use crate::domain::order::{Order, OrderItem, OrderStatus};
use crate::domain::user::User;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::admin_catalog::{
    CreateCategoryRequest, CreateProductRequest, UpdateCategoryRequest, UpdateProductRequest,
};
use crate::inbound::http::admin_orders::UpdateStatusRequest;
use crate::inbound::http::cart::{AddItemRequest, UpdateItemRequest};
use crate::inbound::http::checkout::CheckoutRequest;
use crate::inbound::http::ApiError;
use pagination::Page;

/// Enrich the generated document with the gateway identity header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "GatewayIdentity",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Authenticated subject asserted by the upstream gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Storefront backend API",
        description = "Catalog, cart, checkout, order, and admin operations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("GatewayIdentity" = [])),
    paths(
        crate::inbound::http::catalog::list_products,
        crate::inbound::http::catalog::get_product,
        crate::inbound::http::catalog::list_categories,
        crate::inbound::http::cart::view_cart,
        crate::inbound::http::cart::add_item,
        crate::inbound::http::cart::update_item,
        crate::inbound::http::cart::remove_item,
        crate::inbound::http::checkout::checkout,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::admin_catalog::list_products,
        crate::inbound::http::admin_catalog::create_product,
        crate::inbound::http::admin_catalog::get_product,
        crate::inbound::http::admin_catalog::update_product,
        crate::inbound::http::admin_catalog::deactivate_product,
        crate::inbound::http::admin_catalog::create_category,
        crate::inbound::http::admin_catalog::update_category,
        crate::inbound::http::admin_orders::list_orders,
        crate::inbound::http::admin_orders::get_order,
        crate::inbound::http::admin_orders::update_status,
        crate::inbound::http::admin_analytics::sales_report,
        crate::inbound::http::admin_users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        Error,
        ErrorCode,
        Category,
        Product,
        Page<Product>,
        Cart,
        CartLine,
        CartProduct,
        Order,
        OrderItem,
        OrderStatus,
        Page<Order>,
        User,
        Page<User>,
        SalesReport,
        TopProduct,
        AddItemRequest,
        UpdateItemRequest,
        CheckoutRequest,
        CreateProductRequest,
        UpdateProductRequest,
        CreateCategoryRequest,
        UpdateCategoryRequest,
        UpdateStatusRequest,
    )),
    tags(
        (name = "catalog", description = "Customer-facing product and category reads"),
        (name = "cart", description = "The caller's shopping cart"),
        (name = "checkout", description = "Cart-to-order conversion"),
        (name = "orders", description = "Customer order history"),
        (name = "admin-catalog", description = "Catalog management"),
        (name = "admin-orders", description = "Order management"),
        (name = "admin-analytics", description = "Sales reporting"),
        (name = "admin-users", description = "User directory"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
