//! Salon Settings

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salon::{reminders::ReminderPolicy, slots::SlotGenerator};

use crate::uuids::TypedUuid;

/// The bookable resource (the stylist) a deployment schedules for.
#[derive(Debug)]
pub struct Resource;

/// Resource UUID
pub type ResourceUuid = TypedUuid<Resource>;

/// Deployment-wide booking settings.
#[derive(Debug, Clone)]
pub struct SalonSettings {
    /// Resource every window and appointment belongs to.
    pub resource: ResourceUuid,

    /// Time zone calendar dates are interpreted in.
    pub time_zone: TimeZone,

    /// Candidate enumeration for slot queries.
    pub slots: SlotGenerator,

    /// Reminder timing.
    pub reminders: ReminderPolicy,

    /// ISO 4217 code deposits are charged in.
    pub currency: String,
}

impl SalonSettings {
    /// Settings with default stride and reminder lead.
    #[must_use]
    pub fn new(resource: ResourceUuid, time_zone: TimeZone, currency: impl Into<String>) -> Self {
        Self {
            resource,
            time_zone,
            slots: SlotGenerator::default(),
            reminders: ReminderPolicy::default(),
            currency: currency.into(),
        }
    }

    /// First instant of `date` and of the following date in the salon time zone.
    ///
    /// # Errors
    ///
    /// Returns an error when either boundary cannot be represented.
    pub fn day_bounds(&self, date: Date) -> Result<(Timestamp, Timestamp), jiff::Error> {
        let start = date.to_zoned(self.time_zone.clone())?.timestamp();
        let end = date.tomorrow()?.to_zoned(self.time_zone.clone())?.timestamp();

        Ok((start, end))
    }
}
