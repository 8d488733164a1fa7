//! Reminder Handlers

pub(crate) mod deliver;
