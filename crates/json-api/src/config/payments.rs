//! Payments Config

use std::time::Duration;

use clap::Args;

use salon_app::payments::HttpPaymentsConfig;

/// Payment processor settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Payment processor API address
    #[arg(id = "payments_addr", long = "payments-addr", env = "PAYMENTS_ADDR")]
    pub addr: String,

    /// Payment processor API key
    #[arg(
        id = "payments_api_key",
        long = "payments-api-key",
        env = "PAYMENTS_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,

    /// ISO 4217 code deposits are charged in
    #[arg(
        long = "payments-currency",
        env = "PAYMENTS_CURRENCY",
        default_value = "GBP"
    )]
    pub currency: String,

    /// Shared secret the processor sends in `x-webhook-secret`
    #[arg(
        long = "payments-webhook-secret",
        env = "PAYMENTS_WEBHOOK_SECRET",
        hide_env_values = true
    )]
    pub webhook_secret: String,

    /// Seconds to wait on each payment processor request
    #[arg(
        id = "payments_timeout_seconds",
        long = "payments-timeout-seconds",
        env = "PAYMENTS_TIMEOUT_SECONDS",
        default_value_t = 10
    )]
    pub timeout_seconds: u64,
}

impl From<&PaymentsConfig> for HttpPaymentsConfig {
    fn from(config: &PaymentsConfig) -> Self {
        Self {
            addr: config.addr.clone(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}
