//! Admin order management handlers.

use actix_web::{get, put, web};
use pagination::{Page, PageParams};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::order::{Order, OrderFilter, OrderStatus};
use crate::inbound::http::identity::Subject;
use crate::inbound::http::require_admin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::domain::Error;

/// Query parameters accepted by the admin order listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct OrderListQuery {
    /// Restrict to a single status.
    pub status: Option<String>,
    /// One-based page number.
    pub page: Option<i64>,
    /// Items per page, capped at 100.
    pub per_page: Option<i64>,
}

/// Request body for progressing an order's status.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// New status, one of the lowercase lifecycle names.
    #[schema(example = "shipped")]
    pub status: String,
}

/// List every order, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    params(OrderListQuery),
    responses(
        (status = 200, description = "One page of orders", body = Page<Order>),
        (status = 400, description = "Unknown status filter", body = crate::inbound::http::ApiError),
        (status = 403, description = "Caller is not an admin", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-orders"],
    operation_id = "listAllOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    subject: Subject,
    query: web::Query<OrderListQuery>,
) -> ApiResult<web::Json<Page<Order>>> {
    require_admin(&state, subject).await?;
    let query = query.into_inner();
    let status = query
        .status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let page = PageParams::clamped(query.page, query.per_page);
    let orders = state
        .orders
        .list_all_orders(OrderFilter { status }, page)
        .await?;
    Ok(web::Json(orders))
}

/// Fetch any order by id.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "Unknown order", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-orders"],
    operation_id = "getOrderAdmin"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Order>> {
    require_admin(&state, subject).await?;
    let order = state.orders.get_order(path.into_inner()).await?;
    Ok(web::Json(order))
}

/// Set an order's fulfilment status.
#[utoipa::path(
    put,
    path = "/api/v1/admin/orders/{id}/status",
    params(("id" = i32, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "The updated order", body = Order),
        (status = 400, description = "Unknown status value", body = crate::inbound::http::ApiError),
        (status = 404, description = "Unknown order", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-orders"],
    operation_id = "updateOrderStatus"
)]
#[put("/orders/{id}/status")]
pub async fn update_status(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<Order>> {
    require_admin(&state, subject).await?;
    let order = state
        .order_commands
        .update_status(path.into_inner(), &body.status)
        .await?;
    Ok(web::Json(order))
}
