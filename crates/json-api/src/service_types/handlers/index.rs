//! Service Type Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salon_app::domain::service_types::records::ServiceTypeRecord;

use crate::{extensions::*, service_types::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceTypeResponse {
    pub uuid: Uuid,
    pub name: String,
    pub category: String,

    /// Minutes the service occupies
    pub duration_minutes: u32,

    /// Full price in minor currency units
    pub price: u64,

    /// Deposit charged at booking, in minor currency units
    pub deposit: u64,
}

impl From<ServiceTypeRecord> for ServiceTypeResponse {
    fn from(record: ServiceTypeRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            deposit: record.deposit(),
            name: record.name,
            category: record.category,
            duration_minutes: record.duration_minutes,
            price: record.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceTypesResponse {
    /// Bookable services
    pub service_types: Vec<ServiceTypeResponse>,
}

/// Service Type Index Handler
///
/// Lists the services customers can currently book.
#[endpoint(
    tags("service-types"),
    summary = "List Service Types",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ServiceTypesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.principal_or_401()?;

    let service_types = state
        .app
        .service_types
        .list_service_types(false)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ServiceTypesResponse {
        service_types: service_types.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use salon_app::domain::service_types::{
        MockServiceTypesService, ServiceTypesServiceError, records::ServiceTypeUuid,
    };

    use crate::test_helpers::{Mocks, customer_service, make_service_type};

    use super::*;

    fn make_service(service_types: MockServiceTypesService) -> Service {
        customer_service(
            Mocks {
                service_types,
                ..Mocks::default()
            },
            Router::with_path("service-types").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_lists_active_services_with_deposit() -> TestResult {
        let uuid = ServiceTypeUuid::new();
        let record = make_service_type(uuid, 85_01);

        let mut service_types = MockServiceTypesService::new();

        service_types
            .expect_list_service_types()
            .once()
            .withf(|include_inactive| !*include_inactive)
            .return_once(move |_| Ok(vec![record]));

        let mut res = TestClient::get("http://example.com/service-types")
            .send(&make_service(service_types))
            .await;

        let body: ServiceTypesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.service_types.len(), 1);

        let service = body.service_types.first().ok_or("expected a service type")?;

        assert_eq!(service.uuid, uuid.into_uuid());
        assert_eq!(service.price, 85_01);
        assert_eq!(service.deposit, 42_50);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut service_types = MockServiceTypesService::new();

        service_types
            .expect_list_service_types()
            .once()
            .return_once(|_| Err(ServiceTypesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/service-types")
            .send(&make_service(service_types))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
