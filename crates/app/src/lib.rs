//! Salon application services, persistence and collaborator clients.

pub mod context;
pub mod database;
pub mod domain;
mod http;
pub mod identity;
pub mod notifications;
pub mod payments;
pub mod settings;

#[cfg(test)]
mod test;

pub mod uuids;
