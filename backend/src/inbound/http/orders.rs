//! Customer order history handlers.
//!
//! Callers only ever see their own orders; an order id belonging to another
//! user reads as absent rather than forbidden.

use actix_web::{get, web};

use crate::domain::order::Order;
use crate::inbound::http::identity::Subject;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List the caller's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "The caller's orders", body = [Order]),
        (status = 401, description = "Missing or invalid identity", body = crate::inbound::http::ApiError)
    ),
    tags = ["orders"],
    operation_id = "listMyOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    subject: Subject,
) -> ApiResult<web::Json<Vec<Order>>> {
    let orders = state.orders.list_my_orders(subject.user_id()).await?;
    Ok(web::Json(orders))
}

/// Fetch one of the caller's orders with its frozen items.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "No such order for this caller", body = crate::inbound::http::ApiError)
    ),
    tags = ["orders"],
    operation_id = "getMyOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Order>> {
    let order = state
        .orders
        .get_my_order(subject.user_id(), path.into_inner())
        .await?;
    Ok(web::Json(order))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::order::{OrderItem, OrderStatus};
    use crate::domain::ports::MockOrderQuery;
    use crate::domain::Error;
    use crate::inbound::http::identity::USER_ID_HEADER;
    use crate::inbound::http::test_utils::{state_with, TestPorts};

    fn order(id: i32, user_id: i32) -> Order {
        Order {
            id,
            user_id,
            total_amount: "30.00".parse().expect("valid decimal"),
            shipping_address: "1 High Street".into(),
            status: OrderStatus::Shipped,
            created_at: chrono::Utc::now(),
            items: vec![OrderItem {
                id: 1,
                order_id: id,
                product_id: 3,
                product_name: Some("Widget".into()),
                quantity: 3,
                price: "10.00".parse().expect("valid decimal"),
            }],
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_scopes_to_the_subject() {
        let mut orders = MockOrderQuery::new();
        orders
            .expect_list_my_orders()
            .with(eq(7))
            .returning(|user_id| Ok(vec![order(42, user_id)]));

        let state = state_with(TestPorts {
            orders: Some(orders),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_orders),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/orders")
            .insert_header((USER_ID_HEADER, "7"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["id"], 42);
        assert_eq!(body[0]["items"][0]["product_name"], "Widget");
    }

    #[rstest]
    #[actix_web::test]
    async fn foreign_orders_read_as_absent() {
        let mut orders = MockOrderQuery::new();
        orders
            .expect_get_my_order()
            .with(eq(7), eq(99))
            .returning(|_, order_id| Err(Error::not_found(format!("order {order_id} not found"))));

        let state = state_with(TestPorts {
            orders: Some(orders),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_order),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/orders/99")
            .insert_header((USER_ID_HEADER, "7"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
