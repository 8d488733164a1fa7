//! Bookings service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use salon::status::AppointmentStatus;
use tracing::{Span, error, info, warn};

use crate::{
    database::Db,
    domain::{
        appointments::{
            data::NewAppointment,
            records::{AppointmentRecord, AppointmentUuid},
            repository::PgAppointmentsRepository,
        },
        bookings::{
            data::{Booking, CheckoutOutcome, NewBooking},
            errors::BookingsServiceError,
        },
        service_types::{
            records::{ServiceTypeRecord, ServiceTypeUuid},
            repository::PgServiceTypesRepository,
        },
        subscriptions::NotificationDispatcher,
    },
    identity::{CustomerUuid, Principal},
    notifications::TemplateKind,
    payments::{CheckoutRequest, PaymentGateway},
    settings::SalonSettings,
};

#[derive(Clone)]
pub struct PgBookingsService {
    db: Db,
    settings: SalonSettings,
    service_types: PgServiceTypesRepository,
    appointments: PgAppointmentsRepository,
    payments: Arc<dyn PaymentGateway>,
    dispatcher: NotificationDispatcher,
}

impl fmt::Debug for PgBookingsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgBookingsService")
            .field("db", &self.db)
            .field("settings", &self.settings)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl PgBookingsService {
    #[must_use]
    pub fn new(
        db: Db,
        settings: SalonSettings,
        payments: Arc<dyn PaymentGateway>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            db,
            settings,
            service_types: PgServiceTypesRepository::new(),
            appointments: PgAppointmentsRepository::new(),
            payments,
            dispatcher,
        }
    }

    /// Customer the booking is made for.
    fn booking_customer(
        principal: &Principal,
        requested: Option<CustomerUuid>,
    ) -> Result<CustomerUuid, BookingsServiceError> {
        match requested {
            Some(customer) if customer != principal.customer && !principal.is_admin => {
                Err(BookingsServiceError::Forbidden)
            }
            Some(customer) => Ok(customer),
            None => Ok(principal.customer),
        }
    }

    async fn bookable_service_type(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, BookingsServiceError> {
        let service = self
            .service_types
            .get_service_type(tx, service_type)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => BookingsServiceError::ServiceTypeNotFound,
                error => error.into(),
            })?;

        if !service.active {
            return Err(BookingsServiceError::ServiceTypeNotFound);
        }

        Ok(service)
    }

    /// Open a deposit checkout and store its reference. Failures are
    /// reported in the outcome, never raised.
    ///
    /// A checkout whose reference cannot be stored is reported as failed,
    /// since its settlement could not be matched to the appointment. The
    /// orphaned reference and URL are logged for reconciliation.
    async fn open_checkout(
        &self,
        appointment: AppointmentRecord,
        deposit: u64,
        payer_email: Option<String>,
    ) -> (AppointmentRecord, CheckoutOutcome) {
        let request = CheckoutRequest {
            appointment: appointment.uuid,
            amount: deposit,
            currency: self.settings.currency.clone(),
            payer_email,
        };

        let checkout = match self.payments.create_checkout(request).await {
            Ok(checkout) => checkout,
            Err(error) => {
                warn!(
                    appointment_uuid = %appointment.uuid,
                    error = %error,
                    "failed to open deposit checkout"
                );

                return (
                    appointment,
                    CheckoutOutcome::Failed {
                        reason: error.to_string(),
                    },
                );
            }
        };

        match self
            .store_payment_reference(appointment.uuid, &checkout.payment_reference)
            .await
        {
            Ok(updated) => (updated, CheckoutOutcome::Ready { url: checkout.url }),
            Err(store_error) => {
                error!(
                    appointment_uuid = %appointment.uuid,
                    payment_reference = %checkout.payment_reference,
                    checkout_url = %checkout.url,
                    error = %store_error,
                    "orphaned checkout: failed to store payment reference"
                );

                (
                    appointment,
                    CheckoutOutcome::Failed {
                        reason: "payment reference could not be recorded".to_string(),
                    },
                )
            }
        }
    }

    async fn store_payment_reference(
        &self,
        appointment: AppointmentUuid,
        payment_reference: &str,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .appointments
            .set_payment_reference(&mut tx, appointment, payment_reference)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    #[tracing::instrument(
        name = "bookings.service.book",
        skip(self, principal, booking),
        fields(
            principal_uuid = %principal.customer,
            service_type_uuid = %booking.service_type,
            start_at = %booking.start_at,
            appointment_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn book(
        &self,
        principal: Principal,
        booking: NewBooking,
        now: Timestamp,
    ) -> Result<Booking, BookingsServiceError> {
        let customer = Self::booking_customer(&principal, booking.customer)?;

        if booking.start_at <= now {
            return Err(BookingsServiceError::InvalidField {
                field: "start_at",
                reason: "must be in the future",
            });
        }

        let resource = self.settings.resource;

        let mut tx = self
            .db
            .begin_resource_transaction(resource.into_uuid())
            .await?;

        let service = self
            .bookable_service_type(&mut tx, booking.service_type)
            .await?;

        let end_at = booking
            .start_at
            .checked_add(SignedDuration::from_mins(i64::from(service.duration_minutes)))
            .map_err(|_overflow| BookingsServiceError::InvalidField {
                field: "start_at",
                reason: "out of range",
            })?;

        if self
            .appointments
            .overlap_exists(&mut tx, resource, booking.start_at, end_at, None)
            .await?
        {
            return Err(BookingsServiceError::SlotUnavailable);
        }

        let appointment = self
            .appointments
            .create_appointment(
                &mut tx,
                &NewAppointment {
                    uuid: AppointmentUuid::new(),
                    resource_uuid: resource,
                    customer_uuid: customer,
                    service_type_uuid: service.uuid,
                    start_at: booking.start_at,
                    end_at,
                    notes: booking.notes,
                },
            )
            .await?;

        tx.commit().await?;

        Span::current().record("appointment_uuid", tracing::field::display(appointment.uuid));

        info!("booked appointment");

        let payer_email = if customer == principal.customer {
            principal.email
        } else {
            None
        };

        let (appointment, checkout) = self
            .open_checkout(appointment, service.deposit(), payer_email)
            .await;

        self.dispatcher
            .dispatch_detached(appointment.clone(), TemplateKind::BookingCreated);

        Ok(Booking {
            appointment,
            checkout,
        })
    }

    #[tracing::instrument(
        name = "bookings.service.retry_checkout",
        skip(self, principal),
        fields(principal_uuid = %principal.customer, appointment_uuid = %appointment),
        err
    )]
    async fn retry_checkout(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
        now: Timestamp,
    ) -> Result<CheckoutOutcome, BookingsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.appointments.get_appointment(&mut tx, appointment).await?;

        if !principal.can_access(record.customer_uuid) {
            return Err(BookingsServiceError::Forbidden);
        }

        if record.status != AppointmentStatus::Booked || record.start_at <= now {
            return Err(BookingsServiceError::NotAwaitingPayment {
                status: record.status,
            });
        }

        let service = self
            .service_types
            .get_service_type(&mut tx, record.service_type_uuid)
            .await?;

        tx.commit().await?;

        let payer_email = if record.customer_uuid == principal.customer {
            principal.email
        } else {
            None
        };

        let (_, checkout) = self
            .open_checkout(record, service.deposit(), payer_email)
            .await;

        Ok(checkout)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Reserves `booking.start_at` for the service's duration, then opens the
    /// deposit checkout. Checkout failure does not undo the reservation.
    async fn book(
        &self,
        principal: Principal,
        booking: NewBooking,
        now: Timestamp,
    ) -> Result<Booking, BookingsServiceError>;

    /// Opens a fresh deposit checkout for an unpaid appointment.
    async fn retry_checkout(
        &self,
        principal: Principal,
        appointment: AppointmentUuid,
        now: Timestamp,
    ) -> Result<CheckoutOutcome, BookingsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::civil::date;
    use proptest::{
        collection,
        strategy::{Strategy, ValueTree},
        test_runner::TestRunner,
    };
    use testresult::TestResult;
    use tokio::task::JoinSet;

    use crate::{
        domain::{
            appointments::AppointmentsService,
            service_types::ServiceTypesService,
            subscriptions::{SubscriptionsService, data::NewDeviceSubscription},
        },
        notifications::{AppointmentNotice, MockNotifier, Notifier, NotifierError, ReminderTask},
        payments::{Checkout, MockPaymentGateway, PaymentError},
        test::{
            TestContext,
            helpers::{capture_logs, local, new_service_type, set_status},
        },
    };

    use super::*;

    /// Accepts every call and never completes it.
    struct StalledNotifier;

    #[async_trait]
    impl Notifier for StalledNotifier {
        async fn notify(
            &self,
            _recipient: &str,
            _template: TemplateKind,
            _payload: AppointmentNotice,
        ) -> Result<(), NotifierError> {
            std::future::pending().await
        }

        async fn schedule_delayed(
            &self,
            _task: ReminderTask,
            _deliver_at: Timestamp,
        ) -> Result<(), NotifierError> {
            std::future::pending().await
        }
    }

    fn quiet_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier.expect_notify().never();
        notifier.expect_schedule_delayed().never();

        notifier
    }

    fn accepting_gateway(reference: &'static str) -> MockPaymentGateway {
        let mut gateway = MockPaymentGateway::new();

        gateway.expect_create_checkout().returning(move |request| {
            Ok(Checkout {
                url: format!("https://pay.example.com/{}", request.appointment),
                payment_reference: format!("{reference}-{}", request.appointment),
            })
        });

        gateway
    }

    fn refusing_gateway() -> MockPaymentGateway {
        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_create_checkout()
            .returning(|_| Err(PaymentError::UnexpectedResponse("503".to_string())));

        gateway
    }

    async fn bookable_service(
        ctx: &TestContext,
    ) -> Result<ServiceTypeRecord, Box<dyn std::error::Error>> {
        Ok(ctx
            .service_types
            .create_service_type(new_service_type("Cut & Finish", 45, 85_01))
            .await?)
    }

    fn booking_at(service: &ServiceTypeRecord, start_at: Timestamp) -> NewBooking {
        NewBooking {
            service_type: service.uuid,
            start_at,
            notes: Some("Bring reference photos".to_string()),
            customer: None,
        }
    }

    #[tokio::test]
    async fn book_reserves_slot_and_opens_deposit_checkout() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let start = local(date(2026, 6, 15), 9, 0, tz)?;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let principal = Principal {
            email: Some("ada@example.com".to_string()),
            ..Principal::customer(CustomerUuid::new())
        };

        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_create_checkout()
            .withf(|request| {
                request.amount == 42_50
                    && request.currency == "GBP"
                    && request.payer_email.as_deref() == Some("ada@example.com")
            })
            .once()
            .return_once(|_| {
                Ok(Checkout {
                    url: "https://pay.example.com/c/1".to_string(),
                    payment_reference: "pay_1".to_string(),
                })
            });

        let booking = ctx
            .bookings_with(gateway, quiet_notifier())
            .book(principal.clone(), booking_at(&service, start), now)
            .await?;

        assert_eq!(
            booking.checkout,
            CheckoutOutcome::Ready {
                url: "https://pay.example.com/c/1".to_string()
            }
        );

        let appointment = booking.appointment;

        assert_eq!(appointment.status, AppointmentStatus::Booked);
        assert_eq!(appointment.customer_uuid, principal.customer);
        assert_eq!(appointment.start_at, start);
        assert_eq!(appointment.end_at, start.checked_add(SignedDuration::from_mins(45))?);
        assert_eq!(appointment.payment_reference.as_deref(), Some("pay_1"));

        Ok(())
    }

    #[tokio::test]
    async fn payment_failure_keeps_reservation() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let principal = Principal::customer(CustomerUuid::new());

        let booking = ctx
            .bookings_with(refusing_gateway(), quiet_notifier())
            .book(
                principal.clone(),
                booking_at(&service, local(date(2026, 6, 15), 10, 0, tz)?),
                local(date(2026, 6, 1), 9, 0, tz)?,
            )
            .await?;

        assert!(booking.checkout.url().is_none());
        assert!(booking.checkout.error().is_some());
        assert_eq!(booking.appointment.payment_reference, None);

        let stored = ctx
            .appointments_with(quiet_notifier())
            .get_appointment(principal, booking.appointment.uuid)
            .await?;

        assert_eq!(stored.status, AppointmentStatus::Booked);

        Ok(())
    }

    #[tokio::test]
    async fn start_in_the_past_returns_invalid_field() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 15), 12, 0, tz)?;

        let result = ctx
            .bookings_with(MockPaymentGateway::new(), quiet_notifier())
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                now,
            )
            .await;

        assert!(
            matches!(
                result,
                Err(BookingsServiceError::InvalidField {
                    field: "start_at",
                    ..
                })
            ),
            "expected InvalidField(start_at), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn overlapping_booking_returns_slot_unavailable() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let bookings = ctx.bookings_with(accepting_gateway("pay"), quiet_notifier());

        bookings
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                now,
            )
            .await?;

        let result = bookings
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 9, 30, tz)?),
                now,
            )
            .await;

        assert!(
            matches!(result, Err(BookingsServiceError::SlotUnavailable)),
            "expected SlotUnavailable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn canceled_booking_frees_the_slot() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let start = local(date(2026, 6, 15), 9, 0, tz)?;
        let bookings = ctx.bookings_with(accepting_gateway("pay"), quiet_notifier());

        let first = bookings
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, start),
                now,
            )
            .await?;

        set_status(&ctx, first.appointment.uuid, AppointmentStatus::Canceled).await?;

        let second = bookings
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, start),
                now,
            )
            .await?;

        assert_eq!(second.appointment.start_at, start);

        Ok(())
    }

    #[tokio::test]
    async fn simultaneous_identical_bookings_admit_exactly_one() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let start = local(date(2026, 6, 15), 11, 0, tz)?;
        let bookings = ctx.bookings_with(accepting_gateway("pay"), quiet_notifier());

        let (first, second) = tokio::join!(
            bookings.book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, start),
                now,
            ),
            bookings.book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, start),
                now,
            ),
        );

        let outcomes = [first, second];

        assert_eq!(outcomes.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|result| matches!(result, Err(BookingsServiceError::SlotUnavailable))),
            "expected one SlotUnavailable, got {outcomes:?}"
        );

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_overlapping_attempts_store_disjoint_appointments() -> TestResult {
        let ctx = TestContext::new().await;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let opening = local(date(2026, 6, 15), 9, 0, tz)?;

        let mut services = Vec::new();

        for minutes in [30, 45, 60, 90] {
            services.push(
                ctx.service_types
                    .create_service_type(new_service_type(
                        &format!("{minutes} minute treatment"),
                        minutes,
                        60_00,
                    ))
                    .await?,
            );
        }

        // Starts on a 5 minute grid across three hours, so most attempts
        // collide with another one only partially.
        let attempts = collection::vec((0..services.len(), 0_i64..36), 24)
            .new_tree(&mut TestRunner::deterministic())?
            .current();

        let bookings = ctx.bookings_with(accepting_gateway("pay"), quiet_notifier());
        let mut tasks = JoinSet::new();

        for (service, step) in attempts {
            let bookings = bookings.clone();
            let booking = booking_at(
                &services[service],
                opening.checked_add(SignedDuration::from_mins(step * 5))?,
            );

            tasks.spawn(async move {
                bookings
                    .book(Principal::customer(CustomerUuid::new()), booking, now)
                    .await
            });
        }

        let mut admitted = 0;
        let mut refused = 0;

        while let Some(outcome) = tasks.join_next().await {
            match outcome? {
                Ok(_) => admitted += 1,
                Err(BookingsServiceError::SlotUnavailable) => refused += 1,
                Err(error) => return Err(error.into()),
            }
        }

        let mut tx = ctx.db.pool().begin().await?;
        let stored = PgAppointmentsRepository::new()
            .list_held_between(
                &mut tx,
                ctx.settings.resource,
                opening,
                opening.checked_add(SignedDuration::from_hours(6))?,
            )
            .await?;
        tx.commit().await?;

        assert!(admitted >= 1, "expected at least one admitted booking");
        assert!(refused >= 1, "expected at least one refused booking");
        assert_eq!(stored.len(), admitted);

        for pair in stored.windows(2) {
            let [earlier, later] = pair else {
                continue;
            };

            assert!(
                earlier.end_at <= later.start_at,
                "stored appointments overlap: {earlier:?} and {later:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn stalled_notification_service_does_not_hold_up_booking() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let principal = Principal::customer(CustomerUuid::new());

        ctx.subscriptions
            .register(
                principal.clone(),
                NewDeviceSubscription {
                    address: "customer-phone".to_string(),
                },
            )
            .await?;

        let bookings = PgBookingsService::new(
            ctx.app_db(),
            ctx.settings.clone(),
            Arc::new(accepting_gateway("pay")),
            ctx.dispatcher(Arc::new(StalledNotifier)),
        );

        let booking = tokio::time::timeout(
            Duration::from_secs(5),
            bookings.book(
                principal,
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                local(date(2026, 6, 1), 9, 0, tz)?,
            ),
        )
        .await??;

        assert!(booking.checkout.url().is_some());
        assert_eq!(booking.appointment.status, AppointmentStatus::Booked);

        Ok(())
    }

    #[tokio::test]
    async fn unrecorded_checkout_reference_is_logged_for_reconciliation() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;

        let mut gateway = MockPaymentGateway::new();

        gateway.expect_create_checkout().times(2).returning(|request| {
            Ok(Checkout {
                url: format!("https://pay.example.com/{}", request.appointment),
                payment_reference: "pay_reused".to_string(),
            })
        });

        let bookings = ctx.bookings_with(gateway, quiet_notifier());

        let first = bookings
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                now,
            )
            .await?;

        let (logs, _guard) = capture_logs();

        let second = bookings
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 11, 0, tz)?),
                now,
            )
            .await?;

        assert_eq!(first.appointment.payment_reference.as_deref(), Some("pay_reused"));
        assert_eq!(second.appointment.payment_reference, None);
        assert!(second.checkout.error().is_some());

        let output = logs.contents();

        assert!(output.contains("orphaned checkout"), "missing log line in {output}");
        assert!(output.contains("pay_reused"), "missing reference in {output}");
        assert!(
            output.contains(&format!("https://pay.example.com/{}", second.appointment.uuid)),
            "missing checkout url in {output}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn inactive_service_type_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;

        ctx.service_types
            .deactivate_service_type(service.uuid)
            .await?;

        let result = ctx
            .bookings_with(MockPaymentGateway::new(), quiet_notifier())
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                local(date(2026, 6, 1), 9, 0, tz)?,
            )
            .await;

        assert!(
            matches!(result, Err(BookingsServiceError::ServiceTypeNotFound)),
            "expected ServiceTypeNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_book_for_someone_else() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;

        let result = ctx
            .bookings_with(MockPaymentGateway::new(), quiet_notifier())
            .book(
                Principal::customer(CustomerUuid::new()),
                NewBooking {
                    customer: Some(CustomerUuid::new()),
                    ..booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?)
                },
                local(date(2026, 6, 1), 9, 0, tz)?,
            )
            .await;

        assert!(
            matches!(result, Err(BookingsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn admin_books_on_behalf_of_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let customer = CustomerUuid::new();

        let mut gateway = MockPaymentGateway::new();

        gateway
            .expect_create_checkout()
            .withf(|request| request.payer_email.is_none())
            .once()
            .return_once(|_| {
                Ok(Checkout {
                    url: "https://pay.example.com/c/2".to_string(),
                    payment_reference: "pay_2".to_string(),
                })
            });

        let admin = Principal {
            email: Some("owner@example.com".to_string()),
            ..Principal::admin(CustomerUuid::new())
        };

        let booking = ctx
            .bookings_with(gateway, quiet_notifier())
            .book(
                admin,
                NewBooking {
                    customer: Some(customer),
                    ..booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?)
                },
                local(date(2026, 6, 1), 9, 0, tz)?,
            )
            .await?;

        assert_eq!(booking.appointment.customer_uuid, customer);

        Ok(())
    }

    #[tokio::test]
    async fn retry_checkout_after_outage_stores_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let principal = Principal::customer(CustomerUuid::new());

        let failed = ctx
            .bookings_with(refusing_gateway(), quiet_notifier())
            .book(
                principal.clone(),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                now,
            )
            .await?;

        let outcome = ctx
            .bookings_with(accepting_gateway("retry"), quiet_notifier())
            .retry_checkout(principal.clone(), failed.appointment.uuid, now)
            .await?;

        assert!(outcome.url().is_some());

        let stored = ctx
            .appointments_with(quiet_notifier())
            .get_appointment(principal, failed.appointment.uuid)
            .await?;

        assert_eq!(
            stored.payment_reference,
            Some(format!("retry-{}", failed.appointment.uuid))
        );

        Ok(())
    }

    #[tokio::test]
    async fn retry_checkout_for_paid_appointment_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;
        let principal = Principal::customer(CustomerUuid::new());

        let booking = ctx
            .bookings_with(accepting_gateway("pay"), quiet_notifier())
            .book(
                principal.clone(),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                now,
            )
            .await?;

        set_status(&ctx, booking.appointment.uuid, AppointmentStatus::Paid).await?;

        let result = ctx
            .bookings_with(MockPaymentGateway::new(), quiet_notifier())
            .retry_checkout(principal, booking.appointment.uuid, now)
            .await;

        assert!(
            matches!(
                result,
                Err(BookingsServiceError::NotAwaitingPayment {
                    status: AppointmentStatus::Paid
                })
            ),
            "expected NotAwaitingPayment, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn retry_checkout_by_stranger_is_forbidden() -> TestResult {
        let ctx = TestContext::new().await;
        let service = bookable_service(&ctx).await?;
        let tz = &ctx.settings.time_zone;
        let now = local(date(2026, 6, 1), 9, 0, tz)?;

        let booking = ctx
            .bookings_with(refusing_gateway(), quiet_notifier())
            .book(
                Principal::customer(CustomerUuid::new()),
                booking_at(&service, local(date(2026, 6, 15), 9, 0, tz)?),
                now,
            )
            .await?;

        let result = ctx
            .bookings_with(MockPaymentGateway::new(), quiet_notifier())
            .retry_checkout(
                Principal::customer(CustomerUuid::new()),
                booking.appointment.uuid,
                now,
            )
            .await;

        assert!(
            matches!(result, Err(BookingsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }
}
