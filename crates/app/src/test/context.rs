//! Test context for service-level integration tests.

use std::sync::Arc;

use jiff::tz::TimeZone;

use crate::{
    database::Db,
    domain::{
        appointments::PgAppointmentsService, availability::PgAvailabilityService,
        bookings::PgBookingsService, reminders::ReminderScheduler,
        service_types::PgServiceTypesService, slots::PgSlotsService,
        subscriptions::{NotificationDispatcher, PgSubscriptionsService},
    },
    notifications::{MockNotifier, Notifier},
    payments::MockPaymentGateway,
    settings::{ResourceUuid, SalonSettings},
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub settings: SalonSettings,
    pub service_types: PgServiceTypesService,
    pub availability: PgAvailabilityService,
    pub slots: PgSlotsService,
    pub subscriptions: PgSubscriptionsService,
}

impl TestContext {
    /// Fresh database, UTC salon with a random resource charging in GBP.
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let settings = SalonSettings::new(ResourceUuid::new(), TimeZone::UTC, "GBP");

        Self {
            service_types: PgServiceTypesService::new(db.clone()),
            availability: PgAvailabilityService::new(db.clone(), settings.clone()),
            slots: PgSlotsService::new(db.clone(), settings.clone()),
            subscriptions: PgSubscriptionsService::new(db),
            settings,
            db: test_db,
        }
    }

    pub fn app_db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }

    pub fn dispatcher(&self, notifier: Arc<dyn Notifier>) -> NotificationDispatcher {
        NotificationDispatcher::new(self.app_db(), notifier)
    }

    /// Appointments service whose notifications and reminders go to `notifier`.
    pub fn appointments_with(&self, notifier: MockNotifier) -> PgAppointmentsService {
        let notifier: Arc<dyn Notifier> = Arc::new(notifier);

        PgAppointmentsService::new(
            self.app_db(),
            self.settings.clone(),
            self.dispatcher(Arc::clone(&notifier)),
            ReminderScheduler::new(self.settings.reminders, notifier),
        )
    }

    /// Bookings service charging through `gateway`.
    pub fn bookings_with(
        &self,
        gateway: MockPaymentGateway,
        notifier: MockNotifier,
    ) -> PgBookingsService {
        PgBookingsService::new(
            self.app_db(),
            self.settings.clone(),
            Arc::new(gateway),
            self.dispatcher(Arc::new(notifier)),
        )
    }
}
