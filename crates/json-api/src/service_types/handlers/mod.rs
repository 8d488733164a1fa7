//! Service Type Handlers

pub(crate) mod index;
