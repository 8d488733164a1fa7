//! Availability Records

use jiff::{Timestamp, civil::Date};
use salon::{
    blocks::{BlockKind, BlockedDate, BlockedDateError},
    intervals::TimeRange,
    windows::AvailabilityWindow,
};

use crate::{
    domain::{availability::errors::InvalidWindowError, service_types::records::ServiceTypeUuid},
    settings::ResourceUuid,
    uuids::TypedUuid,
};

/// Availability Window UUID
pub type AvailabilityWindowUuid = TypedUuid<AvailabilityWindowRecord>;

/// Availability Window Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityWindowRecord {
    pub uuid: AvailabilityWindowUuid,
    pub resource_uuid: ResourceUuid,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub max_slots: u32,
    pub service_types: Option<Vec<ServiceTypeUuid>>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AvailabilityWindowRecord {
    /// Engine view of the window.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored bounds or capacity are invalid.
    pub fn to_window(&self) -> Result<AvailabilityWindow, InvalidWindowError> {
        let allowed = self
            .service_types
            .as_ref()
            .map(|allowed| allowed.iter().map(|uuid| uuid.into_uuid()).collect());

        Ok(AvailabilityWindow::new(
            self.uuid.into_uuid(),
            TimeRange::new(self.start_at, self.end_at)?,
            self.max_slots,
            allowed,
            self.active,
        )?)
    }
}

/// Blocked Date UUID
pub type BlockedDateUuid = TypedUuid<BlockedDateRecord>;

/// Blocked Date Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedDateRecord {
    pub uuid: BlockedDateUuid,
    pub date: Date,
    pub kind: BlockKind,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

impl BlockedDateRecord {
    /// Engine view of the block.
    ///
    /// # Errors
    ///
    /// Returns an error when a partial block's times are not ordered.
    pub fn to_blocked_date(&self) -> Result<BlockedDate, BlockedDateError> {
        match self.kind {
            BlockKind::FullDay => Ok(BlockedDate::full_day(self.date)),
            BlockKind::Partial { start, end } => BlockedDate::partial(self.date, start, end),
        }
    }
}
