//! Tests for the catalog service.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::Utc;
use mockall::predicate::eq;
use pagination::PageParams;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockProductRepository;
use crate::domain::ErrorCode;

fn price(raw: &str) -> BigDecimal {
    raw.parse().expect("valid decimal")
}

fn stored_product(id: i32) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        description: None,
        price: price("9.99"),
        category_id: Some(1),
        category_name: Some("Books".into()),
        stock_quantity: 5,
        image_url: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn stored_category(id: i32) -> Category {
    Category {
        id,
        name: "Books".into(),
        description: None,
        created_at: Utc::now(),
    }
}

fn draft_product() -> NewProduct {
    NewProduct {
        name: "Widget".into(),
        description: None,
        price: price("9.99"),
        category_id: 1,
        stock_quantity: 5,
        image_url: None,
        is_active: true,
    }
}

#[rstest]
#[tokio::test]
async fn get_product_hides_inactive_rows_from_customers() {
    let mut repo = MockProductRepository::new();
    let mut inactive = stored_product(7);
    inactive.is_active = false;
    repo.expect_find_product()
        .with(eq(7))
        .returning(move |_| Ok(Some(inactive.clone())));

    let service = CatalogService::new(Arc::new(repo));
    let error = service
        .get_product(7, true)
        .await
        .expect_err("inactive product must be hidden");
    assert_eq!(error.code(), ErrorCode::NotFound);

    let product = service
        .get_product(7, false)
        .await
        .expect("admin view sees inactive rows");
    assert!(!product.is_active);
}

#[rstest]
#[tokio::test]
async fn get_product_maps_missing_row_to_not_found() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_product().returning(|_| Ok(None));

    let service = CatalogService::new(Arc::new(repo));
    let error = service.get_product(99, false).await.expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_products_maps_connection_error_to_service_unavailable() {
    let mut repo = MockProductRepository::new();
    repo.expect_list_products()
        .returning(|_, _| Err(ProductRepositoryError::connection("pool exhausted")));

    let service = CatalogService::new(Arc::new(repo));
    let error = service
        .list_products(ProductFilter::default(), PageParams::clamped(None, None))
        .await
        .expect_err("connection failure");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn create_product_requires_an_existing_category() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_category().with(eq(1)).returning(|_| Ok(None));
    repo.expect_insert_product().times(0);

    let service = CatalogService::new(Arc::new(repo));
    let error = service
        .create_product(draft_product())
        .await
        .expect_err("unknown category");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_product_validates_before_touching_storage() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_category().times(0);
    repo.expect_insert_product().times(0);

    let service = CatalogService::new(Arc::new(repo));
    let mut draft = draft_product();
    draft.price = price("-1.00");
    let error = service.create_product(draft).await.expect_err("bad price");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn create_product_inserts_validated_draft() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_category()
        .with(eq(1))
        .returning(|id| Ok(Some(stored_category(id))));
    repo.expect_insert_product()
        .withf(|draft| draft.name == "Widget")
        .returning(|_| Ok(stored_product(7)));

    let service = CatalogService::new(Arc::new(repo));
    let product = service
        .create_product(draft_product())
        .await
        .expect("create succeeds");
    assert_eq!(product.id, 7);
}

#[rstest]
#[tokio::test]
async fn update_product_rejects_empty_patches() {
    let mut repo = MockProductRepository::new();
    repo.expect_update_product().times(0);

    let service = CatalogService::new(Arc::new(repo));
    let error = service
        .update_product(7, ProductPatch::default())
        .await
        .expect_err("empty patch");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn update_product_checks_replacement_category() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_category().with(eq(9)).returning(|_| Ok(None));
    repo.expect_update_product().times(0);

    let service = CatalogService::new(Arc::new(repo));
    let patch = ProductPatch {
        category_id: Some(Some(9)),
        ..ProductPatch::default()
    };
    let error = service
        .update_product(7, patch)
        .await
        .expect_err("unknown category");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_product_maps_missing_row_to_not_found() {
    let mut repo = MockProductRepository::new();
    repo.expect_update_product().returning(|_, _| Ok(None));

    let service = CatalogService::new(Arc::new(repo));
    let patch = ProductPatch {
        stock_quantity: Some(3),
        ..ProductPatch::default()
    };
    let error = service.update_product(99, patch).await.expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn deactivate_product_maps_missing_row_to_not_found() {
    let mut repo = MockProductRepository::new();
    repo.expect_deactivate_product()
        .with(eq(99))
        .returning(|_| Ok(false));

    let service = CatalogService::new(Arc::new(repo));
    let error = service.deactivate_product(99).await.expect_err("missing");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn category_updates_flow_through_validation() {
    let mut repo = MockProductRepository::new();
    repo.expect_update_category().times(0);

    let service = CatalogService::new(Arc::new(repo));
    let patch = CategoryPatch {
        name: Some("  ".into()),
        ..CategoryPatch::default()
    };
    let error = service
        .update_category(1, patch)
        .await
        .expect_err("blank name");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
