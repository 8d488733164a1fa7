//! HTTP payment processor client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    http::client_with_timeout,
    payments::{Checkout, CheckoutRequest, PaymentError, PaymentGateway},
};

/// Configuration for connecting to the payment processor.
#[derive(Debug, Clone)]
pub struct HttpPaymentsConfig {
    /// Processor API address, e.g. `"https://payments.example.com"`.
    pub addr: String,

    /// Secret API key.
    pub api_key: String,

    /// Per-request deadline.
    pub timeout: Duration,
}

/// Opens checkout sessions through the processor's REST API.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: HttpPaymentsConfig,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HttpPaymentsConfig) -> Result<Self, PaymentError> {
        let http = client_with_timeout(config.timeout)?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_checkout(&self, request: CheckoutRequest) -> Result<Checkout, PaymentError> {
        let url = format!("{}/v1/checkouts", self.config.addr);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&CheckoutBody::from(&request))
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentError::Rejected(format!("{status}: {text}")));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentError::UnexpectedResponse(format!(
                "checkout request failed with status {status}: {text}"
            )));
        }

        let parsed: CheckoutResponse = response.json().await?;

        Ok(Checkout {
            url: parsed.url,
            payment_reference: parsed.payment_reference,
        })
    }
}

#[derive(Debug, Serialize)]
struct CheckoutBody<'a> {
    reference: Uuid,
    amount: u64,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<&'a str>,
}

impl<'a> From<&'a CheckoutRequest> for CheckoutBody<'a> {
    fn from(request: &'a CheckoutRequest) -> Self {
        Self {
            reference: request.appointment.into_uuid(),
            amount: request.amount,
            currency: &request.currency,
            customer_email: request.payer_email.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    url: String,
    payment_reference: String,
}
