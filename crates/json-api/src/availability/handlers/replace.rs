//! Replace Availability Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use salon_app::domain::availability::data::NewAvailabilityWindow;

use crate::{
    availability::{errors::into_status_error, get::AvailabilityResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WindowRequest {
    /// Window start, RFC 3339 with offset
    pub start_at: String,

    /// Window end, RFC 3339 with offset
    pub end_at: String,

    /// Maximum concurrent bookings
    pub max_slots: u32,

    /// Restrict the window to these services
    pub service_types: Option<Vec<Uuid>>,
}

impl WindowRequest {
    fn into_new_window(self) -> Result<NewAvailabilityWindow, StatusError> {
        Ok(NewAvailabilityWindow {
            start_at: self.start_at.to_timestamp_or_400("start_at")?,
            end_at: self.end_at.to_timestamp_or_400("end_at")?,
            max_slots: self.max_slots,
            service_types: self
                .service_types
                .map(|allowed| allowed.into_iter().map(Into::into).collect()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReplaceAvailabilityRequest {
    /// Every window for the date; an empty list closes the date
    pub windows: Vec<WindowRequest>,
}

/// Replace Availability Handler
///
/// Replaces every working window on a date.
#[endpoint(
    tags("availability"),
    summary = "Replace Availability",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Windows replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator access required"),
    ),
)]
pub(crate) async fn handler(
    date: PathParam<String>,
    json: JsonBody<ReplaceAvailabilityRequest>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let date = date.into_inner().to_date_or_400("date")?;

    let windows = json
        .into_inner()
        .windows
        .into_iter()
        .map(WindowRequest::into_new_window)
        .collect::<Result<Vec<_>, _>>()?;

    let windows = state
        .app
        .availability
        .replace_windows(date, windows)
        .await
        .map_err(into_status_error)?;

    info!(%date, windows = windows.len(), "availability replaced");

    Ok(Json(AvailabilityResponse {
        date: date.to_string(),
        windows: windows.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use salon_app::domain::availability::{AvailabilityServiceError, MockAvailabilityService};

    use crate::test_helpers::{Mocks, admin_service, customer_service, make_window};

    use super::*;

    const ROUTE: &str = "availability/{date}";

    fn make_service(availability: MockAvailabilityService) -> Service {
        admin_service(
            Mocks {
                availability,
                ..Mocks::default()
            },
            Router::with_path(ROUTE).put(handler),
        )
    }

    #[tokio::test]
    async fn test_replace_returns_stored_windows() -> TestResult {
        let start_at: Timestamp = "2026-05-04T09:00:00Z".parse()?;
        let end_at: Timestamp = "2026-05-04T10:00:00Z".parse()?;
        let window = make_window(start_at, end_at);

        let mut availability = MockAvailabilityService::new();

        availability
            .expect_replace_windows()
            .once()
            .withf(move |d, windows| {
                *d == date(2026, 5, 4)
                    && *windows
                        == [NewAvailabilityWindow {
                            start_at,
                            end_at,
                            max_slots: 1,
                            service_types: None,
                        }]
            })
            .return_once(move |_, _| Ok(vec![window]));

        let mut res = TestClient::put("http://example.com/availability/2026-05-04")
            .json(&json!({
                "windows": [{
                    "start_at": "2026-05-04T09:00:00Z",
                    "end_at": "2026-05-04T10:00:00Z",
                    "max_slots": 1,
                }]
            }))
            .send(&make_service(availability))
            .await;

        let body: AvailabilityResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.windows.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_rejects_inverted_window() -> TestResult {
        let mut availability = MockAvailabilityService::new();

        availability.expect_replace_windows().once().return_once(|_, _| {
            Err(AvailabilityServiceError::InvalidField {
                field: "end_at",
                reason: "must be after start_at",
            })
        });

        let mut res = TestClient::put("http://example.com/availability/2026-05-04")
            .json(&json!({
                "windows": [{
                    "start_at": "2026-05-04T10:00:00Z",
                    "end_at": "2026-05-04T09:00:00Z",
                    "max_slots": 1,
                }]
            }))
            .send(&make_service(availability))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(
            res.take_string().await?.contains("end_at"),
            "expected the brief to name the field"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_replace_windows() -> TestResult {
        let mut availability = MockAvailabilityService::new();

        availability.expect_replace_windows().never();

        let service = customer_service(
            Mocks {
                availability,
                ..Mocks::default()
            },
            Router::with_path(ROUTE).put(handler),
        );

        let res = TestClient::put("http://example.com/availability/2026-05-04")
            .json(&json!({ "windows": [] }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
