//! Slot Generation
//!
//! Turns the windows configured for a date, minus blocks and existing
//! reservations, into the start times a customer may book for a service.

use jiff::{SignedDuration, Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    blocks::{BlockedDate, BlockedDateError},
    intervals::{TimeRange, TimeRangeError},
    services::ServiceType,
    status::AppointmentStatus,
    windows::AvailabilityWindow,
};

/// Default spacing between candidate start times.
pub const DEFAULT_SLOT_STRIDE: SignedDuration = SignedDuration::from_mins(30);

/// Errors raised while generating slots.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Candidate spacing must be positive.
    #[error("slot stride must be positive, got {0}")]
    NonPositiveStride(SignedDuration),

    /// Slots are only generated for bookable services.
    #[error("service type {0} is not active")]
    InactiveService(Uuid),

    /// The date's partial block could not be resolved.
    #[error(transparent)]
    Block(#[from] BlockedDateError),

    /// A candidate range could not be built.
    #[error(transparent)]
    Range(#[from] TimeRangeError),
}

/// An existing reservation occupying a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    range: TimeRange,
    status: AppointmentStatus,
}

impl Reservation {
    /// Create a reservation.
    pub fn new(range: TimeRange, status: AppointmentStatus) -> Self {
        Self { range, status }
    }

    /// Reserved range.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Reservation status.
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Whether this reservation still blocks its range.
    pub fn is_held(&self) -> bool {
        self.status.holds_slot()
    }
}

/// A bookable start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    range: TimeRange,
    window: Uuid,
}

impl Slot {
    /// Range the service would occupy.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Slot start.
    pub fn start(&self) -> Timestamp {
        self.range.start()
    }

    /// Slot end.
    pub fn end(&self) -> Timestamp {
        self.range.end()
    }

    /// Window the slot was generated from.
    pub fn window(&self) -> Uuid {
        self.window
    }
}

/// Inputs for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct SlotQuery<'a> {
    /// Calendar date in the salon time zone.
    pub date: Date,

    /// Salon time zone.
    pub time_zone: &'a TimeZone,

    /// Service being booked.
    pub service: &'a ServiceType,

    /// Windows configured around the date.
    pub windows: &'a [AvailabilityWindow],

    /// Block registered for the date, if any.
    pub blocked: Option<&'a BlockedDate>,

    /// Reservations that may collide with the date's windows.
    pub reservations: &'a [Reservation],

    /// Candidates must start strictly after this instant.
    pub not_before: Timestamp,
}

/// Enumerates candidate start times at a fixed stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGenerator {
    stride: SignedDuration,
}

impl Default for SlotGenerator {
    fn default() -> Self {
        Self {
            stride: DEFAULT_SLOT_STRIDE,
        }
    }
}

impl SlotGenerator {
    /// Create a generator with a custom stride.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::NonPositiveStride`] when `stride` is zero or negative.
    pub fn new(stride: SignedDuration) -> Result<Self, SlotError> {
        if !stride.is_positive() {
            return Err(SlotError::NonPositiveStride(stride));
        }

        Ok(Self { stride })
    }

    /// Spacing between candidates.
    pub fn stride(&self) -> SignedDuration {
        self.stride
    }

    /// Generate the bookable slots for a date and service.
    ///
    /// Slots are grouped by window (windows ordered by start, then uuid) and
    /// chronological within a window. Overlapping windows are evaluated
    /// independently, so the same start may appear once per window.
    ///
    /// # Errors
    ///
    /// Returns an error when the service is inactive, the date's partial
    /// block cannot be resolved, or a candidate range overflows.
    pub fn generate(&self, query: &SlotQuery<'_>) -> Result<Vec<Slot>, SlotError> {
        if !query.service.is_active() {
            return Err(SlotError::InactiveService(query.service.uuid()));
        }

        let block = query.blocked.filter(|block| block.date() == query.date);

        if block.is_some_and(BlockedDate::is_full_day) {
            return Ok(Vec::new());
        }

        let blocked_range = match block {
            Some(block) => block.partial_range(query.time_zone)?,
            None => None,
        };

        let held: Vec<TimeRange> = query
            .reservations
            .iter()
            .filter(|reservation| reservation.is_held())
            .map(Reservation::range)
            .collect();

        let mut windows: Vec<&AvailabilityWindow> = query
            .windows
            .iter()
            .filter(|window| window.is_active())
            .filter(|window| window.date_in(query.time_zone) == query.date)
            .filter(|window| window.admits(query.service.uuid()))
            .collect();

        windows.sort_by_key(|window| (window.range().start(), window.uuid()));

        let duration = query.service.duration();
        let mut slots = Vec::new();

        for window in windows {
            let window_range = window.range();

            let booked = held
                .iter()
                .filter(|range| window_range.contains(range))
                .count();

            if booked >= usize::try_from(window.max_slots()).unwrap_or(usize::MAX) {
                continue;
            }

            let mut start = window_range.start();

            loop {
                let candidate = TimeRange::starting_at(start, duration)?;

                if candidate.end() > window_range.end() {
                    break;
                }

                let bookable = candidate.start() > query.not_before
                    && blocked_range.is_none_or(|blocked| !candidate.overlaps(&blocked))
                    && !held.iter().any(|range| candidate.overlaps(range));

                if bookable {
                    slots.push(Slot {
                        range: candidate,
                        window: window.uuid(),
                    });
                }

                start = start
                    .checked_add(self.stride)
                    .map_err(|_overflow| TimeRangeError::OutOfBounds)?;
            }
        }

        Ok(slots)
    }
}
