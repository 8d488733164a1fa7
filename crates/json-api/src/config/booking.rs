//! Booking Config

use clap::Args;
use jiff::{SignedDuration, tz::TimeZone};
use thiserror::Error;
use uuid::Uuid;

use salon::{
    reminders::ReminderPolicy,
    slots::{SlotError, SlotGenerator},
};
use salon_app::settings::{ResourceUuid, SalonSettings};

/// Booking settings that cannot be turned into [`SalonSettings`].
#[derive(Debug, Error)]
pub enum BookingConfigError {
    /// `SALON_TIME_ZONE` is not a known IANA zone.
    #[error("unknown time zone '{name}': {source}")]
    TimeZone {
        /// Configured name.
        name: String,

        /// Lookup failure.
        #[source]
        source: jiff::Error,
    },

    /// `SLOT_STRIDE_MINUTES` is not usable.
    #[error("invalid slot stride: {0}")]
    Stride(#[from] SlotError),
}

/// Salon booking settings.
#[derive(Debug, Args)]
pub struct BookingConfig {
    /// Resource (stylist) appointments are scheduled for
    #[arg(long, env = "SALON_RESOURCE_UUID")]
    pub resource_uuid: Uuid,

    /// IANA time zone calendar dates are interpreted in
    #[arg(long, env = "SALON_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,

    /// Spacing between candidate slot starts, in minutes
    #[arg(long, env = "SLOT_STRIDE_MINUTES", default_value_t = 30_i64)]
    pub slot_stride_minutes: i64,

    /// How long before an appointment the reminder goes out, in minutes
    #[arg(long, env = "REMINDER_LEAD_MINUTES", default_value_t = 15_i64)]
    pub reminder_lead_minutes: i64,
}

impl BookingConfig {
    /// Resolve into application settings charging deposits in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown time zone or a non-positive stride.
    pub fn settings(&self, currency: &str) -> Result<SalonSettings, BookingConfigError> {
        let time_zone =
            TimeZone::get(&self.time_zone).map_err(|source| BookingConfigError::TimeZone {
                name: self.time_zone.clone(),
                source,
            })?;

        let mut settings = SalonSettings::new(
            ResourceUuid::from_uuid(self.resource_uuid),
            time_zone,
            currency,
        );

        settings.slots = SlotGenerator::new(SignedDuration::from_mins(self.slot_stride_minutes))?;
        settings.reminders =
            ReminderPolicy::new(SignedDuration::from_mins(self.reminder_lead_minutes));

        Ok(settings)
    }
}
