//! HTTP adapter: routing, identity, and the error envelope.
//!
//! Handlers are thin translations between HTTP and the domain ports held in
//! [`HttpState`]. Routes live under `/api/v1`, with the admin surface nested
//! at `/api/v1/admin` behind the access gate.

use actix_web::web;

pub mod admin_analytics;
pub mod admin_catalog;
pub mod admin_orders;
pub mod admin_users;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod health;
pub mod identity;
pub mod orders;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use identity::{Subject, USER_ID_HEADER};
pub use state::HttpState;

use crate::domain::access::AccessDecision;
use crate::domain::user::User;
use crate::domain::Error;

/// Resolve the subject against the access gate, returning the admin user.
///
/// Unknown subjects and non-admins both map to the same 403 so the admin
/// surface does not reveal which user ids exist.
pub async fn require_admin(state: &web::Data<HttpState>, subject: Subject) -> Result<User, ApiError> {
    match state.access.check_admin(subject.user_id()).await? {
        AccessDecision::Allowed(user) => Ok(user),
        AccessDecision::Forbidden => Err(Error::forbidden("admin access required").into()),
    }
}

/// Register every API route on the given service config.
///
/// Health probes are registered separately by the server so they stay
/// outside the versioned API surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/admin")
                    .service(admin_catalog::list_products)
                    .service(admin_catalog::create_product)
                    .service(admin_catalog::get_product)
                    .service(admin_catalog::update_product)
                    .service(admin_catalog::deactivate_product)
                    .service(admin_catalog::create_category)
                    .service(admin_catalog::update_category)
                    .service(admin_orders::list_orders)
                    .service(admin_orders::get_order)
                    .service(admin_orders::update_status)
                    .service(admin_analytics::sales_report)
                    .service(admin_users::list_users),
            )
            .service(catalog::list_products)
            .service(catalog::get_product)
            .service(catalog::list_categories)
            .service(cart::view_cart)
            .service(cart::add_item)
            .service(cart::update_item)
            .service(cart::remove_item)
            .service(checkout::checkout)
            .service(orders::list_orders)
            .service(orders::get_order),
    );
}
