//! Admin user directory handler.

use actix_web::{get, web};
use pagination::{Page, PageParams};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::user::User;
use crate::inbound::http::identity::Subject;
use crate::inbound::http::require_admin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters accepted by the user listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserListQuery {
    /// One-based page number.
    pub page: Option<i64>,
    /// Items per page, capped at 100.
    pub per_page: Option<i64>,
}

/// List registered users, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    params(UserListQuery),
    responses(
        (status = 200, description = "One page of users", body = Page<User>),
        (status = 403, description = "Caller is not an admin", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    subject: Subject,
    query: web::Query<UserListQuery>,
) -> ApiResult<web::Json<Page<User>>> {
    require_admin(&state, subject).await?;
    let query = query.into_inner();
    let page = PageParams::clamped(query.page, query.per_page);
    let users = state.users.list_users(page).await?;
    Ok(web::Json(users))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::access::AccessDecision;
    use crate::domain::ports::{MockAccessGate, MockUsersQuery};
    use crate::inbound::http::identity::USER_ID_HEADER;
    use crate::inbound::http::test_utils::{state_with, TestPorts};

    fn user(id: i32, is_admin: bool) -> User {
        User {
            id,
            username: format!("user{id}"),
            is_admin,
            created_at: chrono::Utc::now(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn admins_see_the_directory() {
        let mut gate = MockAccessGate::new();
        gate.expect_check_admin()
            .returning(|user_id| Ok(AccessDecision::Allowed(user(user_id, true))));
        let mut users = MockUsersQuery::new();
        users
            .expect_list_users()
            .returning(|page| Ok(Page::new(vec![user(1, true), user(2, false)], 2, &page)));

        let state = state_with(TestPorts {
            access: Some(gate),
            users: Some(users),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_users),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header((USER_ID_HEADER, "1"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["items"][1]["is_admin"], false);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_subjects_are_forbidden() {
        let mut gate = MockAccessGate::new();
        gate.expect_check_admin()
            .returning(|_| Ok(AccessDecision::Forbidden));

        let state = state_with(TestPorts {
            access: Some(gate),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_users),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header((USER_ID_HEADER, "999"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
