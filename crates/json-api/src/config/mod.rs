//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use salon_app::context::AppConfig;

use crate::config::{
    booking::{BookingConfig, BookingConfigError},
    db::DatabaseConfig,
    identity::IdentityConfig,
    notifications::NotificationsConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    payments::PaymentsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod booking;
pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod notifications;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;

/// Salon JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "salon-json", about = "Salon booking JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Notification service settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,

    /// Salon booking settings.
    #[command(flatten)]
    pub booking: BookingConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }

    /// Application wiring derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the booking settings are invalid.
    pub fn app_config(&self) -> Result<AppConfig, BookingConfigError> {
        Ok(AppConfig {
            database_url: self.database.database_url.clone(),
            pool_limits: (&self.database).into(),
            settings: self.booking.settings(&self.payments.currency)?,
            identity: (&self.identity).into(),
            payments: (&self.payments).into(),
            notifications: (&self.notifications).into(),
        })
    }
}
