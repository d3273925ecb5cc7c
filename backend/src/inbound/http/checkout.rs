//! Checkout handler.
//!
//! A single POST converts the caller's cart into an order. Stock is
//! re-validated under row locks inside the storage transaction, so a 400
//! from this endpoint means the cart as a whole was rejected and nothing
//! was written.

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::inbound::http::identity::Subject;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for placing an order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Delivery address captured onto the order.
    pub shipping_address: String,
}

/// Place an order from the caller's cart.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "The placed order", body = crate::domain::order::Order),
        (status = 400, description = "Empty cart, unavailable product, or insufficient stock", body = crate::inbound::http::ApiError),
        (status = 401, description = "Missing or invalid identity", body = crate::inbound::http::ApiError)
    ),
    tags = ["checkout"],
    operation_id = "checkout"
)]
#[post("/checkout")]
pub async fn checkout(
    state: web::Data<HttpState>,
    subject: Subject,
    body: web::Json<CheckoutRequest>,
) -> ApiResult<HttpResponse> {
    let order = state
        .checkout
        .checkout(subject.user_id(), body.into_inner().shipping_address)
        .await?;
    Ok(HttpResponse::Created().json(order))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::order::{Order, OrderStatus};
    use crate::domain::ports::MockCheckoutCommand;
    use crate::domain::Error;
    use crate::inbound::http::identity::USER_ID_HEADER;
    use crate::inbound::http::test_utils::{state_with, TestPorts};

    fn placed_order(user_id: i32) -> Order {
        Order {
            id: 42,
            user_id,
            total_amount: "59.97".parse().expect("valid decimal"),
            shipping_address: "1 High Street".into(),
            status: OrderStatus::Pending,
            created_at: chrono::Utc::now(),
            items: Vec::new(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn successful_checkout_returns_201_with_the_order() {
        let mut port = MockCheckoutCommand::new();
        port.expect_checkout()
            .withf(|user_id, address| *user_id == 7 && address == "1 High Street")
            .returning(|user_id, _| Ok(placed_order(user_id)));

        let state = state_with(TestPorts {
            checkout: Some(port),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(checkout),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/checkout")
            .insert_header((USER_ID_HEADER, "7"))
            .set_json(json!({ "shipping_address": "1 High Street" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], 42);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["total_amount"], "59.97");
    }

    #[rstest]
    #[case::empty(Error::empty_cart("cart is empty"), "empty_cart")]
    #[case::unavailable(
        Error::product_unavailable("product Widget is no longer available"),
        "product_unavailable"
    )]
    #[actix_web::test]
    async fn rejections_surface_as_400(#[case] error: Error, #[case] expected_code: &str) {
        let mut port = MockCheckoutCommand::new();
        port.expect_checkout().returning(move |_, _| Err(error.clone()));

        let state = state_with(TestPorts {
            checkout: Some(port),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(checkout),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/checkout")
            .insert_header((USER_ID_HEADER, "7"))
            .set_json(json!({ "shipping_address": "1 High Street" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], expected_code);
    }
}
