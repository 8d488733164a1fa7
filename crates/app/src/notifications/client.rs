//! HTTP notification service client.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use reqwest::{Client, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    http::client_with_timeout,
    notifications::{AppointmentNotice, Notifier, NotifierError, ReminderTask, TemplateKind},
};

/// Configuration for connecting to the notification service.
#[derive(Debug, Clone)]
pub struct HttpNotifierConfig {
    /// Service address, e.g. `"http://localhost:8400"`.
    pub addr: String,

    /// Secret API key.
    pub api_key: String,

    /// Per-request deadline.
    pub timeout: Duration,
}

/// Sends messages and schedules delayed tasks through the notification service.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    config: HttpNotifierConfig,
    http: Client,
}

impl HttpNotifier {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HttpNotifierConfig) -> Result<Self, NotifierError> {
        let http = client_with_timeout(config.timeout)?;

        Ok(Self { config, http })
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), NotifierError> {
        let url = format!("{}{path}", self.config.addr);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        ensure_success(path, response).await
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<(), NotifierError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(NotifierError::UnexpectedResponse(format!(
        "{path} request failed with status {status}: {text}"
    )))
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(
        &self,
        recipient: &str,
        template: TemplateKind,
        payload: AppointmentNotice,
    ) -> Result<(), NotifierError> {
        self.post(
            "/v1/messages",
            &MessageBody {
                recipient,
                template,
                payload,
            },
        )
        .await
    }

    async fn schedule_delayed(
        &self,
        task: ReminderTask,
        deliver_at: Timestamp,
    ) -> Result<(), NotifierError> {
        self.post(
            "/v1/tasks",
            &TaskBody {
                kind: TemplateKind::AppointmentReminder,
                appointment: task.appointment.into_uuid(),
                deliver_at,
            },
        )
        .await
    }
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    recipient: &'a str,
    template: TemplateKind,
    payload: AppointmentNotice,
}

#[derive(Debug, Serialize)]
struct TaskBody {
    kind: TemplateKind,
    appointment: Uuid,
    deliver_at: Timestamp,
}
