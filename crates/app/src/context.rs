//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    database::{self, Db, PoolLimits},
    domain::{
        appointments::{AppointmentsService, PgAppointmentsService},
        availability::{AvailabilityService, PgAvailabilityService},
        bookings::{BookingsService, PgBookingsService},
        reminders::{PgRemindersService, ReminderScheduler, RemindersService},
        service_types::{PgServiceTypesService, ServiceTypesService},
        slots::{PgSlotsService, SlotsService},
        subscriptions::{NotificationDispatcher, PgSubscriptionsService, SubscriptionsService},
    },
    identity::{HttpIdentityConfig, HttpIdentityService, IdentityError, IdentityService},
    notifications::{HttpNotifier, HttpNotifierConfig, Notifier, NotifierError},
    payments::{HttpPaymentGateway, HttpPaymentsConfig, PaymentError, PaymentGateway},
    settings::SalonSettings,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build identity client")]
    Identity(#[source] IdentityError),

    #[error("failed to build payments client")]
    Payments(#[source] PaymentError),

    #[error("failed to build notifications client")]
    Notifications(#[source] NotifierError),
}

/// Everything needed to build an [`AppContext`] against real collaborators.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub pool_limits: PoolLimits,
    pub settings: SalonSettings,
    pub identity: HttpIdentityConfig,
    pub payments: HttpPaymentsConfig,
    pub notifications: HttpNotifierConfig,
}

/// External services the application talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityService>,
    pub payments: Arc<dyn PaymentGateway>,
    pub notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub service_types: Arc<dyn ServiceTypesService>,
    pub availability: Arc<dyn AvailabilityService>,
    pub slots: Arc<dyn SlotsService>,
    pub bookings: Arc<dyn BookingsService>,
    pub appointments: Arc<dyn AppointmentsService>,
    pub reminders: Arc<dyn RemindersService>,
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub identity: Arc<dyn IdentityService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a collaborator client cannot be built or
    /// establishing a database connection fails.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let collaborators = Collaborators {
            identity: Arc::new(
                HttpIdentityService::new(config.identity).map_err(AppInitError::Identity)?,
            ),
            payments: Arc::new(
                HttpPaymentGateway::new(config.payments).map_err(AppInitError::Payments)?,
            ),
            notifier: Arc::new(
                HttpNotifier::new(config.notifications).map_err(AppInitError::Notifications)?,
            ),
        };

        let pool = database::connect_with(&config.database_url, config.pool_limits)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_parts(Db::new(pool), config.settings, collaborators))
    }

    /// Wire every service over an existing database handle.
    #[must_use]
    pub fn from_parts(db: Db, settings: SalonSettings, collaborators: Collaborators) -> Self {
        let dispatcher =
            NotificationDispatcher::new(db.clone(), Arc::clone(&collaborators.notifier));
        let reminders = ReminderScheduler::new(settings.reminders, collaborators.notifier);

        Self {
            service_types: Arc::new(PgServiceTypesService::new(db.clone())),
            availability: Arc::new(PgAvailabilityService::new(db.clone(), settings.clone())),
            slots: Arc::new(PgSlotsService::new(db.clone(), settings.clone())),
            bookings: Arc::new(PgBookingsService::new(
                db.clone(),
                settings.clone(),
                collaborators.payments,
                dispatcher.clone(),
            )),
            appointments: Arc::new(PgAppointmentsService::new(
                db.clone(),
                settings,
                dispatcher.clone(),
                reminders,
            )),
            reminders: Arc::new(PgRemindersService::new(db.clone(), dispatcher)),
            subscriptions: Arc::new(PgSubscriptionsService::new(db)),
            identity: collaborators.identity,
        }
    }
}
