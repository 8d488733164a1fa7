//! Device Subscription Records

use jiff::Timestamp;

use crate::{identity::CustomerUuid, uuids::TypedUuid};

/// Device Subscription UUID
pub type DeviceSubscriptionUuid = TypedUuid<DeviceSubscriptionRecord>;

/// Device Subscription Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSubscriptionRecord {
    pub uuid: DeviceSubscriptionUuid,
    pub subscriber_uuid: CustomerUuid,
    pub is_admin: bool,
    pub address: String,
    pub created_at: Timestamp,
}
