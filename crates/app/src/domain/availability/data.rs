//! Availability Data

use jiff::{Timestamp, civil::Date};
use salon::blocks::BlockKind;

use crate::domain::service_types::records::ServiceTypeUuid;

/// New Availability Window Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAvailabilityWindow {
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub max_slots: u32,

    /// Services the window is restricted to; `None` admits all.
    pub service_types: Option<Vec<ServiceTypeUuid>>,
}

/// New Blocked Date Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlockedDate {
    pub date: Date,
    pub kind: BlockKind,
    pub reason: Option<String>,
}
