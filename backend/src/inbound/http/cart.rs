//! Cart handlers.
//!
//! Every cart endpoint requires an authenticated [`Subject`]; the cart a
//! request operates on is always the caller's own. Mutations respond with
//! the refreshed cart so clients never need a follow-up read.

use actix_web::{delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::cart::Cart;
use crate::inbound::http::identity::Subject;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddItemRequest {
    /// Product to add.
    pub product_id: i32,
    /// Units to add; merged with any existing line for the same product.
    #[serde(default = "default_quantity")]
    #[schema(default = 1)]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Request body for changing a cart line's quantity.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    /// New quantity; zero or less removes the line.
    pub quantity: i32,
}

/// View the caller's cart with live prices.
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "The caller's cart", body = Cart),
        (status = 401, description = "Missing or invalid identity", body = crate::inbound::http::ApiError)
    ),
    tags = ["cart"],
    operation_id = "viewCart"
)]
#[get("/cart")]
pub async fn view_cart(state: web::Data<HttpState>, subject: Subject) -> ApiResult<web::Json<Cart>> {
    let cart = state.cart.view_cart(subject.user_id()).await?;
    Ok(web::Json(cart))
}

/// Add a product to the caller's cart.
#[utoipa::path(
    post,
    path = "/api/v1/cart",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "The refreshed cart", body = Cart),
        (status = 400, description = "Invalid quantity or insufficient stock", body = crate::inbound::http::ApiError),
        (status = 404, description = "Unknown or inactive product", body = crate::inbound::http::ApiError)
    ),
    tags = ["cart"],
    operation_id = "addCartItem"
)]
#[post("/cart")]
pub async fn add_item(
    state: web::Data<HttpState>,
    subject: Subject,
    body: web::Json<AddItemRequest>,
) -> ApiResult<web::Json<Cart>> {
    let body = body.into_inner();
    state
        .cart_commands
        .add_item(subject.user_id(), body.product_id, body.quantity)
        .await?;
    let cart = state.cart.view_cart(subject.user_id()).await?;
    Ok(web::Json(cart))
}

/// Change the quantity on one of the caller's cart lines.
#[utoipa::path(
    put,
    path = "/api/v1/cart/{item_id}",
    params(("item_id" = i32, Path, description = "Cart line id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "The refreshed cart", body = Cart),
        (status = 400, description = "Quantity exceeds live stock", body = crate::inbound::http::ApiError),
        (status = 404, description = "No such line in the caller's cart", body = crate::inbound::http::ApiError)
    ),
    tags = ["cart"],
    operation_id = "updateCartItem"
)]
#[put("/cart/{item_id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
    body: web::Json<UpdateItemRequest>,
) -> ApiResult<web::Json<Cart>> {
    state
        .cart_commands
        .update_item(subject.user_id(), path.into_inner(), body.quantity)
        .await?;
    let cart = state.cart.view_cart(subject.user_id()).await?;
    Ok(web::Json(cart))
}

/// Remove a line from the caller's cart.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/{item_id}",
    params(("item_id" = i32, Path, description = "Cart line id")),
    responses(
        (status = 200, description = "The refreshed cart", body = Cart),
        (status = 404, description = "No such line in the caller's cart", body = crate::inbound::http::ApiError)
    ),
    tags = ["cart"],
    operation_id = "removeCartItem"
)]
#[delete("/cart/{item_id}")]
pub async fn remove_item(
    state: web::Data<HttpState>,
    subject: Subject,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Cart>> {
    state
        .cart_commands
        .remove_item(subject.user_id(), path.into_inner())
        .await?;
    let cart = state.cart.view_cart(subject.user_id()).await?;
    Ok(web::Json(cart))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::*;
    use crate::domain::ports::{MockCartCommand, MockCartQuery};
    use crate::domain::Error;
    use crate::inbound::http::identity::USER_ID_HEADER;
    use crate::inbound::http::test_utils::{state_with, TestPorts};

    fn empty_cart_query(user_id: i32) -> MockCartQuery {
        let mut cart = MockCartQuery::new();
        cart.expect_view_cart()
            .with(eq(user_id))
            .returning(|_| Ok(Cart::from_lines(Vec::new())));
        cart
    }

    #[rstest]
    #[actix_web::test]
    async fn view_requires_identity() {
        let state = state_with(TestPorts::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(view_cart),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/cart").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn add_merges_then_returns_the_cart() {
        let mut commands = MockCartCommand::new();
        commands
            .expect_add_item()
            .with(eq(7), eq(3), eq(2))
            .returning(|_, _, _| Ok(()));

        let state = state_with(TestPorts {
            cart: Some(empty_cart_query(7)),
            cart_commands: Some(commands),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(add_item),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cart")
            .insert_header((USER_ID_HEADER, "7"))
            .set_json(json!({ "product_id": 3, "quantity": 2 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total_amount"], "0");
    }

    #[rstest]
    #[actix_web::test]
    async fn add_defaults_to_one_unit() {
        let mut commands = MockCartCommand::new();
        commands
            .expect_add_item()
            .with(eq(7), eq(3), eq(1))
            .returning(|_, _, _| Ok(()));

        let state = state_with(TestPorts {
            cart: Some(empty_cart_query(7)),
            cart_commands: Some(commands),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(add_item),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cart")
            .insert_header((USER_ID_HEADER, "7"))
            .set_json(json!({ "product_id": 3 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[rstest]
    #[actix_web::test]
    async fn stock_shortfall_surfaces_as_400_with_details() {
        let mut commands = MockCartCommand::new();
        commands.expect_add_item().returning(|_, _, _| {
            Err(Error::insufficient_stock("insufficient stock for Widget")
                .with_details(json!({ "requested": 9, "available": 5 })))
        });

        let state = state_with(TestPorts {
            cart_commands: Some(commands),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(add_item),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cart")
            .insert_header((USER_ID_HEADER, "7"))
            .set_json(json!({ "product_id": 3, "quantity": 9 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "insufficient_stock");
        assert_eq!(body["details"]["available"], 5);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_targets_the_path_item() {
        let mut commands = MockCartCommand::new();
        commands
            .expect_update_item()
            .with(eq(7), eq(11), eq(4))
            .returning(|_, _, _| Ok(()));

        let state = state_with(TestPorts {
            cart: Some(empty_cart_query(7)),
            cart_commands: Some(commands),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(update_item),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/cart/11")
            .insert_header((USER_ID_HEADER, "7"))
            .set_json(json!({ "quantity": 4 }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[rstest]
    #[actix_web::test]
    async fn removing_a_foreign_item_is_404() {
        let mut commands = MockCartCommand::new();
        commands
            .expect_remove_item()
            .with(eq(7), eq(11))
            .returning(|_, _| Err(Error::not_found("cart item 11 not found")));

        let state = state_with(TestPorts {
            cart_commands: Some(commands),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(remove_item),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/cart/11")
            .insert_header((USER_ID_HEADER, "7"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
