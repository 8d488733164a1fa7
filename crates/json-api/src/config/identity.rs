//! Identity Config

use std::time::Duration;

use clap::Args;

use salon_app::identity::HttpIdentityConfig;

/// Identity provider settings.
#[derive(Debug, Args)]
pub struct IdentityConfig {
    /// Identity provider address
    #[arg(id = "identity_addr", long = "identity-addr", env = "IDENTITY_ADDR")]
    pub addr: String,

    /// Seconds to wait on each identity provider request
    #[arg(
        id = "identity_timeout_seconds",
        long = "identity-timeout-seconds",
        env = "IDENTITY_TIMEOUT_SECONDS",
        default_value_t = 5
    )]
    pub timeout_seconds: u64,
}

impl From<&IdentityConfig> for HttpIdentityConfig {
    fn from(config: &IdentityConfig) -> Self {
        Self {
            addr: config.addr.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}
