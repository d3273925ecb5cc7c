//! Admin sales analytics handler.

use actix_web::{get, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::analytics::{DateRange, SalesReport};
use crate::domain::Error;
use crate::inbound::http::identity::Subject;
use crate::inbound::http::require_admin;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters bounding the report window.
///
/// Bounds are dates, not timestamps. The end date is expanded to the last
/// second of its day so `start_date=2026-08-01&end_date=2026-08-01` covers
/// the whole of the first.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SalesReportQuery {
    /// Earliest order date included, `YYYY-MM-DD`.
    pub start_date: Option<NaiveDate>,
    /// Latest order date included, `YYYY-MM-DD`.
    pub end_date: Option<NaiveDate>,
}

impl SalesReportQuery {
    fn into_range(self) -> Result<DateRange, Error> {
        let range = DateRange {
            start: self.start_date.and_then(day_start),
            end: self.end_date.and_then(day_end),
        };
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(Error::invalid_request("start_date is after end_date"));
            }
        }
        Ok(range)
    }
}

fn day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

fn day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc())
}

/// Aggregate sales figures for a date range.
#[utoipa::path(
    get,
    path = "/api/v1/admin/analytics/sales",
    params(SalesReportQuery),
    responses(
        (status = 200, description = "Aggregated sales figures", body = SalesReport),
        (status = 400, description = "Inverted date range", body = crate::inbound::http::ApiError),
        (status = 403, description = "Caller is not an admin", body = crate::inbound::http::ApiError)
    ),
    tags = ["admin-analytics"],
    operation_id = "salesReport"
)]
#[get("/analytics/sales")]
pub async fn sales_report(
    state: web::Data<HttpState>,
    subject: Subject,
    query: web::Query<SalesReportQuery>,
) -> ApiResult<web::Json<SalesReport>> {
    require_admin(&state, subject).await?;
    let range = query.into_inner().into_range()?;
    let report = state.sales.sales_report(range).await?;
    Ok(web::Json(report))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::Value;
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::access::AccessDecision;
    use crate::domain::ports::{MockAccessGate, MockSalesQuery};
    use crate::domain::user::User;
    use crate::inbound::http::identity::USER_ID_HEADER;
    use crate::inbound::http::test_utils::{state_with, TestPorts};

    fn admin_gate() -> MockAccessGate {
        let mut gate = MockAccessGate::new();
        gate.expect_check_admin().returning(|user_id| {
            Ok(AccessDecision::Allowed(User {
                id: user_id,
                username: "admin".into(),
                is_admin: true,
                created_at: chrono::Utc::now(),
            }))
        });
        gate
    }

    fn empty_report() -> SalesReport {
        SalesReport {
            total_orders: 0,
            total_revenue: "0.00".parse().expect("valid decimal"),
            average_order_value: "0.00".parse().expect("valid decimal"),
            orders_by_status: BTreeMap::new(),
            top_products: Vec::new(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn end_date_covers_its_whole_day() {
        let mut sales = MockSalesQuery::new();
        sales
            .expect_sales_report()
            .withf(|range| {
                range.start
                    == Utc
                        .with_ymd_and_hms(2026, 8, 1, 0, 0, 0)
                        .single()
                    && range.end
                        == Utc
                            .with_ymd_and_hms(2026, 8, 1, 23, 59, 59)
                            .single()
            })
            .returning(|_| Ok(empty_report()));

        let state = state_with(TestPorts {
            access: Some(admin_gate()),
            sales: Some(sales),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(sales_report),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/analytics/sales?start_date=2026-08-01&end_date=2026-08-01")
            .insert_header((USER_ID_HEADER, "1"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }

    #[rstest]
    #[actix_web::test]
    async fn inverted_range_is_rejected() {
        let state = state_with(TestPorts {
            access: Some(admin_gate()),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(sales_report),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/analytics/sales?start_date=2026-08-02&end_date=2026-08-01")
            .insert_header((USER_ID_HEADER, "1"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn open_ended_ranges_pass_through() {
        let mut sales = MockSalesQuery::new();
        sales
            .expect_sales_report()
            .withf(|range| range.start.is_none() && range.end.is_none())
            .returning(|_| Ok(empty_report()));

        let state = state_with(TestPorts {
            access: Some(admin_gate()),
            sales: Some(sales),
            ..TestPorts::default()
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(sales_report),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/analytics/sales")
            .insert_header((USER_ID_HEADER, "1"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["total_orders"], 0);
    }
}
