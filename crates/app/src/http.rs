//! Outbound HTTP client construction shared by the collaborator clients.

use std::time::Duration;

use reqwest::Client;

/// Ceiling on TCP and TLS connection setup.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Client whose requests give up after `timeout`, response body included.
pub(crate) fn client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(CONNECT_TIMEOUT))
        .build()
}
