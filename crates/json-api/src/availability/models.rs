//! Availability Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salon::blocks::BlockKind;
use salon_app::domain::availability::records::{AvailabilityWindowRecord, BlockedDateRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WindowResponse {
    pub uuid: Uuid,
    pub start_at: String,
    pub end_at: String,

    /// Maximum concurrent bookings the window admits
    pub max_slots: u32,

    /// Services the window is restricted to; absent admits every service
    pub service_types: Option<Vec<Uuid>>,
}

impl From<AvailabilityWindowRecord> for WindowResponse {
    fn from(record: AvailabilityWindowRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            start_at: record.start_at.to_string(),
            end_at: record.end_at.to_string(),
            max_slots: record.max_slots,
            service_types: record
                .service_types
                .map(|allowed| allowed.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BlockedDateResponse {
    pub uuid: Uuid,
    pub date: String,

    /// Start of a partial block; absent for full-day blocks
    pub start_time: Option<String>,

    /// End of a partial block; absent for full-day blocks
    pub end_time: Option<String>,

    pub reason: Option<String>,
    pub created_at: String,
}

impl From<BlockedDateRecord> for BlockedDateResponse {
    fn from(record: BlockedDateRecord) -> Self {
        let (start_time, end_time) = match record.kind {
            BlockKind::FullDay => (None, None),
            BlockKind::Partial { start, end } => (
                Some(start.strftime("%H:%M").to_string()),
                Some(end.strftime("%H:%M").to_string()),
            ),
        };

        Self {
            uuid: record.uuid.into(),
            date: record.date.to_string(),
            start_time,
            end_time,
            reason: record.reason,
            created_at: record.created_at.to_string(),
        }
    }
}
