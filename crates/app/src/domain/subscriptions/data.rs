//! Device Subscription Data

/// New Device Subscription Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeviceSubscription {
    /// Push token, email address or phone number understood by the
    /// notification service.
    pub address: String,
}
