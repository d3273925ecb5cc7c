//! Caller identity extraction.
//!
//! Authentication lives in an upstream identity service; by the time a
//! request reaches this backend the gateway has verified the caller and
//! asserts the subject in the `X-User-Id` header. The [`Subject`] extractor
//! turns that header into a typed value, rejecting requests where it is
//! missing or malformed. Authorisation (the admin gate) is a separate,
//! explicit step.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use super::error::ApiError;
use crate::domain::Error;

/// Header carrying the authenticated subject, set by the gateway.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated subject of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject {
    user_id: i32,
}

impl Subject {
    /// The asserted user id.
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

impl FromRequest for Subject {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_subject(req))
    }
}

fn extract_subject(req: &HttpRequest) -> Result<Subject, ApiError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized("authentication required"))?;
    let user_id: i32 = raw
        .parse()
        .map_err(|_| Error::unauthorized("invalid user identity"))?;
    Ok(Subject { user_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse, ResponseError};
    use rstest::rstest;

    async fn echo_subject(subject: Subject) -> HttpResponse {
        HttpResponse::Ok().body(subject.user_id().to_string())
    }

    fn app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().route("/", web::get().to(echo_subject))
    }

    #[rstest]
    #[actix_web::test]
    async fn extracts_the_asserted_subject() {
        let app = test::init_service(app()).await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((USER_ID_HEADER, "42"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body = test::read_body(res).await;
        assert_eq!(&body[..], b"42");
    }

    #[rstest]
    #[case::missing(None)]
    #[case::not_a_number(Some("abc"))]
    #[actix_web::test]
    async fn rejects_missing_or_malformed_headers(#[case] header: Option<&str>) {
        let app = test::init_service(app()).await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = header {
            req = req.insert_header((USER_ID_HEADER, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn unauthorized_maps_to_401() {
        let error = ApiError::from(Error::unauthorized("authentication required"));
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    }
}
