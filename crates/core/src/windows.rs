//! Availability Windows

use jiff::{civil::Date, tz::TimeZone};
use smallvec::SmallVec;
use thiserror::Error;
use uuid::Uuid;

use crate::intervals::TimeRange;

/// Errors raised when constructing an [`AvailabilityWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityWindowError {
    /// A window must admit at least one reservation.
    #[error("max slots must be at least one")]
    ZeroCapacity,
}

/// Service restriction on a window. `None` admits every service.
pub type AllowedServices = Option<SmallVec<[Uuid; 4]>>;

/// An administrator-defined span during which bookings are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityWindow {
    uuid: Uuid,
    range: TimeRange,
    max_slots: u32,
    allowed_services: AllowedServices,
    active: bool,
}

impl AvailabilityWindow {
    /// Create a window.
    ///
    /// # Errors
    ///
    /// Returns [`AvailabilityWindowError::ZeroCapacity`] when `max_slots` is zero.
    pub fn new(
        uuid: Uuid,
        range: TimeRange,
        max_slots: u32,
        allowed_services: AllowedServices,
        active: bool,
    ) -> Result<Self, AvailabilityWindowError> {
        if max_slots == 0 {
            return Err(AvailabilityWindowError::ZeroCapacity);
        }

        Ok(Self {
            uuid,
            range,
            max_slots,
            allowed_services,
            active,
        })
    }

    /// Window identifier.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Span covered by the window.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Maximum number of reservations the window accepts.
    pub fn max_slots(&self) -> u32 {
        self.max_slots
    }

    /// Whether the window is switched on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the window yields slots for the given service.
    pub fn admits(&self, service: Uuid) -> bool {
        self.allowed_services
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&service))
    }

    /// Calendar date the window belongs to, taken from its start in `tz`.
    pub fn date_in(&self, tz: &TimeZone) -> Date {
        self.range.start().to_zoned(tz.clone()).date()
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn morning() -> Result<TimeRange, Box<dyn std::error::Error>> {
        let start = jiff::civil::date(2026, 3, 2)
            .at(9, 0, 0, 0)
            .to_zoned(TimeZone::UTC)?
            .timestamp();

        Ok(TimeRange::starting_at(start, SignedDuration::from_hours(3))?)
    }

    #[test]
    fn unrestricted_window_admits_any_service() -> TestResult {
        let window = AvailabilityWindow::new(Uuid::now_v7(), morning()?, 2, None, true)?;

        assert!(window.admits(Uuid::now_v7()));

        Ok(())
    }

    #[test]
    fn restricted_window_admits_listed_services_only() -> TestResult {
        let cut = Uuid::now_v7();
        let colour = Uuid::now_v7();

        let window =
            AvailabilityWindow::new(Uuid::now_v7(), morning()?, 2, Some(smallvec![cut]), true)?;

        assert!(window.admits(cut));
        assert!(!window.admits(colour));

        Ok(())
    }

    #[test]
    fn empty_restriction_admits_nothing() -> TestResult {
        let window =
            AvailabilityWindow::new(Uuid::now_v7(), morning()?, 2, Some(SmallVec::new()), true)?;

        assert!(!window.admits(Uuid::now_v7()));

        Ok(())
    }

    #[test]
    fn zero_capacity_is_rejected() -> TestResult {
        assert_eq!(
            AvailabilityWindow::new(Uuid::now_v7(), morning()?, 0, None, true),
            Err(AvailabilityWindowError::ZeroCapacity)
        );

        Ok(())
    }

    #[test]
    fn date_follows_time_zone() -> TestResult {
        let start = jiff::civil::date(2026, 3, 2)
            .at(23, 30, 0, 0)
            .to_zoned(TimeZone::UTC)?
            .timestamp();
        let range = TimeRange::starting_at(start, SignedDuration::from_mins(30))?;
        let window = AvailabilityWindow::new(Uuid::now_v7(), range, 1, None, true)?;
        let tokyo = TimeZone::get("Asia/Tokyo")?;

        assert_eq!(window.date_in(&TimeZone::UTC), jiff::civil::date(2026, 3, 2));
        assert_eq!(window.date_in(&tokyo), jiff::civil::date(2026, 3, 3));

        Ok(())
    }
}
