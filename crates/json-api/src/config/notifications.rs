//! Notifications Config

use std::time::Duration;

use clap::Args;

use salon_app::notifications::HttpNotifierConfig;

/// Notification service settings.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Notification service address
    #[arg(
        id = "notifications_addr",
        long = "notifications-addr",
        env = "NOTIFICATIONS_ADDR"
    )]
    pub addr: String,

    /// Notification service API key
    #[arg(
        id = "notifications_api_key",
        long = "notifications-api-key",
        env = "NOTIFICATIONS_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,

    /// Seconds to wait on each notification service request
    #[arg(
        id = "notifications_timeout_seconds",
        long = "notifications-timeout-seconds",
        env = "NOTIFICATIONS_TIMEOUT_SECONDS",
        default_value_t = 5
    )]
    pub timeout_seconds: u64,
}

impl From<&NotificationsConfig> for HttpNotifierConfig {
    fn from(config: &NotificationsConfig) -> Self {
        Self {
            addr: config.addr.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}
