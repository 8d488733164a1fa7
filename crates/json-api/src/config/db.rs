//! Database Config

use std::time::Duration;

use clap::Args;

use salon_app::database::PoolLimits;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,

    /// Seconds a request may wait for a pooled connection
    #[arg(long, env = "DATABASE_ACQUIRE_TIMEOUT_SECONDS", default_value_t = 5)]
    pub database_acquire_timeout_seconds: u64,
}

impl From<&DatabaseConfig> for PoolLimits {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.database_max_connections.max(1),
            acquire_timeout: Duration::from_secs(config.database_acquire_timeout_seconds),
        }
    }
}
