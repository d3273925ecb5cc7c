//! Customer-facing catalog handlers.
//!
//! ```text
//! GET /api/v1/products?category_id=&search=&page=&per_page=
//! GET /api/v1/products/{id}
//! GET /api/v1/categories
//! ```
//!
//! These endpoints only ever expose active products; deactivated rows read
//! as absent.

use actix_web::{get, web};
use pagination::{Page, PageParams};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::catalog::{Category, Product, ProductFilter};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters accepted by the product listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// Restrict to a single category.
    pub category_id: Option<i32>,
    /// Substring match on the product name.
    pub search: Option<String>,
    /// One-based page number.
    pub page: Option<i64>,
    /// Items per page, capped at 100.
    pub per_page: Option<i64>,
}

/// List active products with filtering and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = Page<Product>),
        (status = 503, description = "Storage unavailable", body = crate::inbound::http::ApiError)
    ),
    tags = ["catalog"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ProductListQuery>,
) -> ApiResult<web::Json<Page<Product>>> {
    let query = query.into_inner();
    let filter = ProductFilter {
        category_id: query.category_id,
        search: query.search.filter(|s| !s.trim().is_empty()),
        active_only: true,
    };
    let page = PageParams::clamped(query.page, query.per_page);
    let products = state.catalog.list_products(filter, page).await?;
    Ok(web::Json(products))
}

/// Fetch a single active product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Unknown or inactive product", body = crate::inbound::http::ApiError)
    ),
    tags = ["catalog"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Product>> {
    let product = state.catalog.get_product(path.into_inner(), true).await?;
    Ok(web::Json(product))
}

/// List every category.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories", body = [Category])
    ),
    tags = ["catalog"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Category>>> {
    let categories = state.catalog.list_categories().await?;
    Ok(web::Json(categories))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockCatalogQuery;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{state_with, TestPorts};

    fn sample_product(id: i32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            description: None,
            price: "19.99".parse().expect("valid decimal"),
            category_id: Some(1),
            category_name: Some("Books".into()),
            stock_quantity: 5,
            image_url: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_forwards_filters_and_wraps_the_page() {
        let mut catalog = MockCatalogQuery::new();
        catalog
            .expect_list_products()
            .withf(|filter, page| {
                filter.category_id == Some(3)
                    && filter.search.as_deref() == Some("wid")
                    && filter.active_only
                    && page.page() == 2
            })
            .returning(|_, page| Ok(Page::new(vec![sample_product(7)], 21, &page)));

        let state = state_with(TestPorts {
            catalog: Some(catalog),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_products),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/products?category_id=3&search=wid&page=2&per_page=10")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total"], 21);
        assert_eq!(body["current_page"], 2);
        assert_eq!(body["items"][0]["price"], "19.99");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_product_returns_404_payload() {
        let mut catalog = MockCatalogQuery::new();
        catalog
            .expect_get_product()
            .with(eq(99), eq(true))
            .returning(|_, _| Err(Error::not_found("product 99 not found")));

        let state = state_with(TestPorts {
            catalog: Some(catalog),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_product),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/products/99").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[actix_web::test]
    async fn categories_serialise_as_an_array() {
        let mut catalog = MockCatalogQuery::new();
        catalog.expect_list_categories().returning(|| {
            Ok(vec![Category {
                id: 1,
                name: "Books".into(),
                description: None,
                created_at: chrono::Utc::now(),
            }])
        });

        let state = state_with(TestPorts {
            catalog: Some(catalog),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_categories),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/categories").to_request(),
        )
        .await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body[0]["name"], "Books");
    }
}
