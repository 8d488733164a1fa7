//! Availability Handlers

pub(crate) mod get;
pub(crate) mod replace;
