//! Create Subscription Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salon_app::domain::subscriptions::{
    data::NewDeviceSubscription, records::DeviceSubscriptionRecord,
};

use crate::{extensions::*, state::State, subscriptions::errors::into_status_error};

/// Create Subscription Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSubscriptionRequest {
    /// Push token, email address or phone number
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubscriptionResponse {
    pub uuid: Uuid,
    pub address: String,

    /// Whether salon-wide notifications are delivered to this address
    pub is_admin: bool,

    pub created_at: String,
}

impl From<DeviceSubscriptionRecord> for SubscriptionResponse {
    fn from(record: DeviceSubscriptionRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            address: record.address,
            is_admin: record.is_admin,
            created_at: record.created_at.to_string(),
        }
    }
}

/// Create Subscription Handler
///
/// Registers a delivery address for the caller's notifications.
#[endpoint(
    tags("subscriptions"),
    summary = "Register Device",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Device registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSubscriptionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubscriptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let subscription = state
        .app
        .subscriptions
        .register(
            principal,
            NewDeviceSubscription {
                address: json.into_inner().address,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(subscription.into()))
}
