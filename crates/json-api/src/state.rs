//! State

use std::sync::Arc;

use salon_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Shared secret expected on payment webhook deliveries.
    pub(crate) webhook_secret: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, webhook_secret: impl Into<String>) -> Self {
        Self {
            app,
            webhook_secret: webhook_secret.into(),
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, webhook_secret: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(app, webhook_secret))
    }
}
