//! Admin catalog management handlers.
//!
//! All routes here sit under `/api/v1/admin` and check the caller against
//! the access gate before touching the catalog. Product deletion is a soft
//! delete; the row survives so historical order items keep their product
//! reference.

use actix_web::{delete, get, post, put, web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use pagination::{Page, PageParams};

use crate::domain::catalog::{
    Category, CategoryPatch, NewCategory, NewProduct, Product, ProductFilter, ProductPatch,
};
use crate::inbound::http::catalog::ProductListQuery;
use crate::inbound::http::identity::Subject;
use crate::inbound::http::require_admin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for creating a product.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Display name, non-blank.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Non-negative unit price.
    #[schema(value_type = String, example = "19.99")]
    pub price: BigDecimal,
    /// Owning category; must exist.
    pub category_id: i32,
    /// Initial stock level, non-negative.
    pub stock_quantity: i32,
    /// Optional image location.
    pub image_url: Option<String>,
    /// Visibility flag; defaults to visible.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Deserialise a field where an explicit JSON `null` must stay observable.
///
/// With `#[serde(default)]` an omitted key yields `None` while a present
/// `null` yields `Some(None)`, which is exactly the patch semantics the
/// nullable columns need.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<CreateProductRequest> for NewProduct {
    fn from(value: CreateProductRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            price: value.price,
            category_id: value.category_id,
            stock_quantity: value.stock_quantity,
            image_url: value.image_url,
            is_active: value.is_active,
        }
    }
}

/// Request body for a partial product update.
///
/// Omitted fields are left untouched. For the nullable columns an explicit
/// JSON `null` clears the stored value, so `{"category_id": null}` detaches
/// the product while omitting the key changes nothing.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// Replacement price.
    #[schema(value_type = Option<String>, example = "24.99")]
    pub price: Option<BigDecimal>,
    /// Replacement category; `null` detaches.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<Option<i32>>,
    /// Replacement stock level.
    pub stock_quantity: Option<i32>,
    /// Replacement image location; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image_url: Option<Option<String>>,
    /// Replacement visibility flag.
    pub is_active: Option<bool>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(value: UpdateProductRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
            price: value.price,
            category_id: value.category_id,
            stock_quantity: value.stock_quantity,
            image_url: value.image_url,
            is_active: value.is_active,
        }
    }
}

/// Request body for creating a category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Display name, non-blank.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for a partial category update.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

/// List products including inactive ones.
#[utoipa::path(
    get,
    path = "/api/v1/admin/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = Page<Product>),
        (status = 403, description = "Caller is not an admin", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "listProductsAdmin"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    subject: Subject,
    query: web::Query<ProductListQuery>,
) -> ApiResult<web::Json<Page<Product>>> {
    require_admin(&state, subject).await?;
    let query = query.into_inner();
    let filter = ProductFilter {
        category_id: query.category_id,
        search: query.search.filter(|s| !s.trim().is_empty()),
        active_only: false,
    };
    let page = PageParams::clamped(query.page, query.per_page);
    let products = state.catalog.list_products(filter, page).await?;
    Ok(web::Json(products))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "The created product", body = Product),
        (status = 400, description = "Validation failed", body = crate::inbound::http::ApiError),
        (status = 403, description = "Caller is not an admin", body = crate::inbound::http::ApiError),
        (status = 404, description = "Unknown category reference", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    subject: Subject,
    body: web::Json<CreateProductRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, subject).await?;
    let product = state
        .catalog_admin
        .create_product(body.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(product))
}

/// Fetch any product, active or not.
#[utoipa::path(
    get,
    path = "/api/v1/admin/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Unknown product", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "getProductAdmin"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Product>> {
    require_admin(&state, subject).await?;
    let product = state.catalog.get_product(path.into_inner(), false).await?;
    Ok(web::Json(product))
}

/// Apply a partial update to a product.
#[utoipa::path(
    put,
    path = "/api/v1/admin/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "The updated product", body = Product),
        (status = 400, description = "Empty or invalid patch", body = crate::inbound::http::ApiError),
        (status = 404, description = "Unknown product", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
    body: web::Json<UpdateProductRequest>,
) -> ApiResult<web::Json<Product>> {
    require_admin(&state, subject).await?;
    let product = state
        .catalog_admin
        .update_product(path.into_inner(), body.into_inner().into())
        .await?;
    Ok(web::Json(product))
}

/// Soft-delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deactivated"),
        (status = 404, description = "Unknown product", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "deactivateProduct"
)]
#[delete("/products/{id}")]
pub async fn deactivate_product(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, subject).await?;
    state
        .catalog_admin
        .deactivate_product(path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "The created category", body = Category),
        (status = 400, description = "Validation failed", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    subject: Subject,
    body: web::Json<CreateCategoryRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, subject).await?;
    let body = body.into_inner();
    let category = state
        .catalog_admin
        .create_category(NewCategory {
            name: body.name,
            description: body.description,
        })
        .await?;
    Ok(HttpResponse::Created().json(category))
}

/// Apply a partial update to a category.
#[utoipa::path(
    put,
    path = "/api/v1/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "The updated category", body = Category),
        (status = 404, description = "Unknown category", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-catalog"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
    body: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<Category>> {
    require_admin(&state, subject).await?;
    let body = body.into_inner();
    let category = state
        .catalog_admin
        .update_category(
            path.into_inner(),
            CategoryPatch {
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(web::Json(category))
}
