//! Time Ranges
//!
//! Half-open `[start, end)` ranges over absolute instants. Every conflict check
//! in the engine goes through [`TimeRange::overlaps`].

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

/// Errors raised when constructing a [`TimeRange`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    /// The range does not end strictly after it starts.
    #[error("range must end after it starts ({start} >= {end})")]
    Empty {
        /// Requested start.
        start: Timestamp,

        /// Requested end.
        end: Timestamp,
    },

    /// The range end could not be represented.
    #[error("range end is out of bounds")]
    OutOfBounds,
}

/// Half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Create a range, rejecting empty or inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::Empty`] when `start >= end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, TimeRangeError> {
        if start >= end {
            return Err(TimeRangeError::Empty { start, end });
        }

        Ok(Self { start, end })
    }

    /// Create a range starting at `start` and lasting `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error when the duration is not positive or the end overflows.
    pub fn starting_at(start: Timestamp, duration: SignedDuration) -> Result<Self, TimeRangeError> {
        let end = start
            .checked_add(duration)
            .map_err(|_overflow| TimeRangeError::OutOfBounds)?;

        Self::new(start, end)
    }

    /// Range start (inclusive).
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Range end (exclusive).
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length of the range.
    pub fn duration(&self) -> SignedDuration {
        self.end.duration_since(self.start)
    }

    /// Whether two ranges share any instant.
    ///
    /// Ranges that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}
