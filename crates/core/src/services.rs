//! Service Types

use jiff::SignedDuration;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when constructing a [`ServiceType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceTypeError {
    /// Services must take some time.
    #[error("service duration must be greater than zero")]
    ZeroDuration,
}

/// A bookable service as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceType {
    uuid: Uuid,
    duration_minutes: u32,
    price: u64,
    active: bool,
}

impl ServiceType {
    /// Create a service type.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceTypeError::ZeroDuration`] when `duration_minutes` is zero.
    pub fn new(
        uuid: Uuid,
        duration_minutes: u32,
        price: u64,
        active: bool,
    ) -> Result<Self, ServiceTypeError> {
        if duration_minutes == 0 {
            return Err(ServiceTypeError::ZeroDuration);
        }

        Ok(Self {
            uuid,
            duration_minutes,
            price,
            active,
        })
    }

    /// Service identifier.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// How long the service occupies the stylist.
    pub fn duration(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.duration_minutes))
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Full price in minor currency units.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Upfront deposit collected when booking.
    pub fn deposit(&self) -> u64 {
        deposit_for(self.price)
    }

    /// Whether the service can currently be booked.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Deposit owed for a price: half, rounded down to the minor unit.
pub fn deposit_for(price: u64) -> u64 {
    price / 2
}
