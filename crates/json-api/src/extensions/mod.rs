//! Extension traits

mod calendar;
mod depot;
mod result;

pub(crate) use calendar::CalendarExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use depot::PrincipalDepotExt as _;
pub(crate) use result::ResultExt as _;
