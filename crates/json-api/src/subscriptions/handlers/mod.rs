//! Subscription Handlers

pub(crate) mod create;
