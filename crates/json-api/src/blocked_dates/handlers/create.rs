//! Create Blocked Date Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use salon::blocks::BlockKind;
use salon_app::domain::availability::data::NewBlockedDate;

use crate::{
    availability::{errors::into_status_error, models::BlockedDateResponse},
    extensions::*,
    state::State,
};

/// Create Blocked Date Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBlockedDateRequest {
    /// Date to block, `YYYY-MM-DD`
    pub date: String,

    /// Start of a partial block, `HH:MM`; omit with `end_time` to block the
    /// whole day
    pub start_time: Option<String>,

    /// End of a partial block, `HH:MM`
    pub end_time: Option<String>,

    pub reason: Option<String>,
}

impl CreateBlockedDateRequest {
    fn into_new_blocked_date(self) -> Result<NewBlockedDate, StatusError> {
        let kind = match (self.start_time, self.end_time) {
            (None, None) => BlockKind::FullDay,
            (Some(start), Some(end)) => BlockKind::Partial {
                start: start.to_time_or_400("start_time")?,
                end: end.to_time_or_400("end_time")?,
            },
            (Some(_), None) => {
                return Err(StatusError::bad_request().brief("end_time: required with start_time"));
            }
            (None, Some(_)) => {
                return Err(StatusError::bad_request().brief("start_time: required with end_time"));
            }
        };

        Ok(NewBlockedDate {
            date: self.date.to_date_or_400("date")?,
            kind,
            reason: self.reason,
        })
    }
}

/// Create Blocked Date Handler
///
/// Blocks a date, fully or between two wall-clock times.
#[endpoint(
    tags("blocked-dates"),
    summary = "Block Date",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Date blocked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator access required"),
        (status_code = StatusCode::CONFLICT, description = "Date is already blocked"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBlockedDateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BlockedDateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let blocked = json.into_inner().into_new_blocked_date()?;

    let blocked = state
        .app
        .availability
        .create_blocked_date(blocked)
        .await
        .map_err(into_status_error)?;

    info!(
        date = %blocked.date,
        full_day = matches!(blocked.kind, BlockKind::FullDay),
        "date blocked"
    );

    res.add_header(LOCATION, format!("/blocked-dates/{}", blocked.date), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(blocked.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use salon_app::domain::availability::{AvailabilityServiceError, MockAvailabilityService};

    use crate::test_helpers::{Mocks, admin_service, customer_service, make_blocked_date};

    use super::*;

    const ROUTE: &str = "blocked-dates";

    fn make_service(availability: MockAvailabilityService) -> Service {
        admin_service(
            Mocks {
                availability,
                ..Mocks::default()
            },
            Router::with_path(ROUTE).post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_full_day_block() -> TestResult {
        let day = date(2026, 12, 25);
        let record = make_blocked_date(day, BlockKind::FullDay);

        let mut availability = MockAvailabilityService::new();

        availability
            .expect_create_blocked_date()
            .once()
            .withf(move |blocked| {
                *blocked
                    == NewBlockedDate {
                        date: day,
                        kind: BlockKind::FullDay,
                        reason: Some("Christmas".to_string()),
                    }
            })
            .return_once(move |_| Ok(record));

        let mut res = TestClient::post("http://example.com/blocked-dates")
            .json(&json!({ "date": "2026-12-25", "reason": "Christmas" }))
            .send(&make_service(availability))
            .await;

        let body: BlockedDateResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/blocked-dates/2026-12-25"));
        assert_eq!(body.date, "2026-12-25");
        assert_eq!(body.start_time, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_partial_block() -> TestResult {
        let day = date(2026, 5, 4);
        let kind = BlockKind::Partial {
            start: time(12, 0, 0, 0),
            end: time(13, 30, 0, 0),
        };
        let record = make_blocked_date(day, kind);

        let mut availability = MockAvailabilityService::new();

        availability
            .expect_create_blocked_date()
            .once()
            .withf(move |blocked| blocked.date == day && blocked.kind == kind)
            .return_once(move |_| Ok(record));

        let mut res = TestClient::post("http://example.com/blocked-dates")
            .json(&json!({ "date": "2026-05-04", "start_time": "12:00", "end_time": "13:30" }))
            .send(&make_service(availability))
            .await;

        let body: BlockedDateResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.start_time.as_deref(), Some("12:00"));
        assert_eq!(body.end_time.as_deref(), Some("13:30"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_half_open_block_returns_400() -> TestResult {
        let mut availability = MockAvailabilityService::new();

        availability.expect_create_blocked_date().never();

        let res = TestClient::post("http://example.com/blocked-dates")
            .json(&json!({ "date": "2026-05-04", "start_time": "12:00" }))
            .send(&make_service(availability))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_returns_409() -> TestResult {
        let mut availability = MockAvailabilityService::new();

        availability
            .expect_create_blocked_date()
            .once()
            .return_once(|_| Err(AvailabilityServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/blocked-dates")
            .json(&json!({ "date": "2026-05-04" }))
            .send(&make_service(availability))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_block_dates() -> TestResult {
        let mut availability = MockAvailabilityService::new();

        availability.expect_create_blocked_date().never();

        let service = customer_service(
            Mocks {
                availability,
                ..Mocks::default()
            },
            Router::with_path(ROUTE).post(handler),
        );

        let res = TestClient::post("http://example.com/blocked-dates")
            .json(&json!({ "date": "2026-05-04" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
