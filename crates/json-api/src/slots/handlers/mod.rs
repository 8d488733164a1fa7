//! Slot Handlers

pub(crate) mod index;
