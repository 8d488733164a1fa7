//! Appointment Handlers

pub(crate) mod cancel;
pub(crate) mod checkout;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod status;
