//! HTTP identity provider client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    http::client_with_timeout,
    identity::{CustomerUuid, IdentityError, IdentityService, Principal},
};

/// Configuration for connecting to the identity provider.
#[derive(Debug, Clone)]
pub struct HttpIdentityConfig {
    /// Provider address, e.g. `"http://localhost:8300"`.
    pub addr: String,

    /// Per-request deadline.
    pub timeout: Duration,
}

/// Resolves bearer tokens through the identity provider's userinfo endpoint.
#[derive(Debug, Clone)]
pub struct HttpIdentityService {
    config: HttpIdentityConfig,
    http: Client,
}

impl HttpIdentityService {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HttpIdentityConfig) -> Result<Self, IdentityError> {
        let http = client_with_timeout(config.timeout)?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, IdentityError> {
        let url = format!("{}/v1/userinfo", self.config.addr);

        let response = self.http.get(&url).bearer_auth(bearer_token).send().await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                return Err(IdentityError::Unauthenticated);
            }
            status => {
                let text = response.text().await.unwrap_or_default();

                return Err(IdentityError::UnexpectedResponse(format!(
                    "userinfo request failed with status {status}: {text}"
                )));
            }
        }

        let parsed: UserInfoResponse = response.json().await?;

        Ok(parsed.into())
    }
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    sub: Uuid,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    admin: bool,
}

impl From<UserInfoResponse> for Principal {
    fn from(response: UserInfoResponse) -> Self {
        Self {
            customer: CustomerUuid::from_uuid(response.sub),
            email: response.email,
            is_admin: response.admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::silent_listener;

    use super::*;

    #[tokio::test]
    async fn unresponsive_provider_times_out() -> TestResult {
        let identity = HttpIdentityService::new(HttpIdentityConfig {
            addr: silent_listener().await?,
            timeout: Duration::from_millis(200),
        })?;

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            identity.authenticate_bearer("token"),
        )
        .await?;

        assert!(
            matches!(&result, Err(IdentityError::Http(error)) if error.is_timeout()),
            "expected a timeout, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn userinfo_defaults_to_non_admin_without_email() -> TestResult {
        let sub = Uuid::now_v7();
        let parsed: UserInfoResponse = serde_json::from_value(serde_json::json!({ "sub": sub }))?;

        let principal = Principal::from(parsed);

        assert_eq!(principal, Principal::customer(CustomerUuid::from_uuid(sub)));

        Ok(())
    }

    #[test]
    fn userinfo_maps_admin_and_email() -> TestResult {
        let sub = Uuid::now_v7();
        let parsed: UserInfoResponse = serde_json::from_value(serde_json::json!({
            "sub": sub,
            "email": "owner@example.com",
            "admin": true,
        }))?;

        let principal = Principal::from(parsed);

        assert!(principal.is_admin);
        assert_eq!(principal.email.as_deref(), Some("owner@example.com"));

        Ok(())
    }
}
