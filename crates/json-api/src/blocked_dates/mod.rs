//! Blocked Dates

mod handlers;

pub(crate) use handlers::*;
