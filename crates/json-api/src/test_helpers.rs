//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use salon::{
    blocks::BlockKind,
    intervals::TimeRange,
    services::ServiceType,
    slots::{Slot, SlotGenerator, SlotQuery},
    status::AppointmentStatus,
    windows::AvailabilityWindow,
};
use salon_app::{
    context::AppContext,
    domain::{
        appointments::{
            MockAppointmentsService,
            records::{AppointmentRecord, AppointmentUuid},
        },
        availability::{
            MockAvailabilityService,
            records::{AvailabilityWindowRecord, AvailabilityWindowUuid, BlockedDateRecord},
        },
        bookings::MockBookingsService,
        reminders::MockRemindersService,
        service_types::{
            MockServiceTypesService,
            records::{ServiceTypeRecord, ServiceTypeUuid},
        },
        slots::MockSlotsService,
        subscriptions::MockSubscriptionsService,
    },
    identity::{CustomerUuid, MockIdentityService, Principal},
    settings::ResourceUuid,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER: CustomerUuid = CustomerUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_ADMIN: CustomerUuid = CustomerUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_WEBHOOK_SECRET: &str = "whsec_test";

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(Principal::customer(TEST_CUSTOMER));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(Principal::admin(TEST_ADMIN));
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks backing a test router. Every mock rejects calls unless the
/// test replaces it with one carrying expectations.
pub(crate) struct Mocks {
    pub(crate) service_types: MockServiceTypesService,
    pub(crate) availability: MockAvailabilityService,
    pub(crate) slots: MockSlotsService,
    pub(crate) bookings: MockBookingsService,
    pub(crate) appointments: MockAppointmentsService,
    pub(crate) reminders: MockRemindersService,
    pub(crate) subscriptions: MockSubscriptionsService,
    pub(crate) identity: MockIdentityService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            service_types: strict_service_types_mock(),
            availability: strict_availability_mock(),
            slots: strict_slots_mock(),
            bookings: strict_bookings_mock(),
            appointments: strict_appointments_mock(),
            reminders: strict_reminders_mock(),
            subscriptions: strict_subscriptions_mock(),
            identity: strict_identity_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        let app = AppContext {
            service_types: Arc::new(self.service_types),
            availability: Arc::new(self.availability),
            slots: Arc::new(self.slots),
            bookings: Arc::new(self.bookings),
            appointments: Arc::new(self.appointments),
            reminders: Arc::new(self.reminders),
            subscriptions: Arc::new(self.subscriptions),
            identity: Arc::new(self.identity),
        };

        State::from_app_context(app, TEST_WEBHOOK_SECRET)
    }
}

fn strict_service_types_mock() -> MockServiceTypesService {
    let mut service_types = MockServiceTypesService::new();

    service_types.expect_list_service_types().never();
    service_types.expect_get_service_type().never();
    service_types.expect_create_service_type().never();
    service_types.expect_deactivate_service_type().never();

    service_types
}

fn strict_availability_mock() -> MockAvailabilityService {
    let mut availability = MockAvailabilityService::new();

    availability.expect_list_windows().never();
    availability.expect_replace_windows().never();
    availability.expect_get_blocked_date().never();
    availability.expect_create_blocked_date().never();
    availability.expect_delete_blocked_date().never();

    availability
}

fn strict_slots_mock() -> MockSlotsService {
    let mut slots = MockSlotsService::new();

    slots.expect_available_slots().never();

    slots
}

fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_book().never();
    bookings.expect_retry_checkout().never();

    bookings
}

fn strict_appointments_mock() -> MockAppointmentsService {
    let mut appointments = MockAppointmentsService::new();

    appointments.expect_get_appointment().never();
    appointments.expect_cancel().never();
    appointments.expect_confirm_payment().never();
    appointments.expect_transition().never();
    appointments.expect_complete_elapsed().never();

    appointments
}

fn strict_reminders_mock() -> MockRemindersService {
    let mut reminders = MockRemindersService::new();

    reminders.expect_deliver_reminder().never();

    reminders
}

fn strict_subscriptions_mock() -> MockSubscriptionsService {
    let mut subscriptions = MockSubscriptionsService::new();

    subscriptions.expect_register().never();

    subscriptions
}

fn strict_identity_mock() -> MockIdentityService {
    let mut identity = MockIdentityService::new();

    identity.expect_authenticate_bearer().never();

    identity
}

pub(crate) fn state_with_identity(identity: MockIdentityService) -> Arc<State> {
    Mocks {
        identity,
        ..Mocks::default()
    }
    .into_state()
}

/// Router serving `route` to an authenticated customer.
pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Router serving `route` to an authenticated administrator.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
}

/// Router serving `route` without any caller.
pub(crate) fn anonymous_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

pub(crate) fn make_service_type(uuid: ServiceTypeUuid, price: u64) -> ServiceTypeRecord {
    ServiceTypeRecord {
        uuid,
        name: "Cut & Finish".to_string(),
        category: "Hair".to_string(),
        duration_minutes: 60,
        price,
        active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_appointment(
    uuid: AppointmentUuid,
    status: AppointmentStatus,
) -> AppointmentRecord {
    let start_at = Timestamp::from_second(1_893_146_400).unwrap_or(Timestamp::UNIX_EPOCH);
    let end_at = Timestamp::from_second(1_893_150_000).unwrap_or(Timestamp::UNIX_EPOCH);

    AppointmentRecord {
        uuid,
        resource_uuid: ResourceUuid::from_uuid(Uuid::nil()),
        customer_uuid: TEST_CUSTOMER,
        service_type_uuid: ServiceTypeUuid::from_uuid(Uuid::nil()),
        start_at,
        end_at,
        status,
        payment_reference: None,
        amount_paid: 0,
        notes: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_window(start_at: Timestamp, end_at: Timestamp) -> AvailabilityWindowRecord {
    AvailabilityWindowRecord {
        uuid: AvailabilityWindowUuid::new(),
        resource_uuid: ResourceUuid::from_uuid(Uuid::nil()),
        start_at,
        end_at,
        max_slots: 4,
        service_types: None,
        active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_blocked_date(date: Date, kind: BlockKind) -> BlockedDateRecord {
    BlockedDateRecord {
        uuid: Uuid::now_v7().into(),
        date,
        kind,
        reason: Some("Training".to_string()),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

/// Slots for a 30 minute service across `[start_at, end_at)` in UTC.
pub(crate) fn make_slots(
    date: Date,
    start_at: Timestamp,
    end_at: Timestamp,
) -> Result<Vec<Slot>, Box<dyn std::error::Error>> {
    let window = AvailabilityWindow::new(
        Uuid::now_v7(),
        TimeRange::new(start_at, end_at)?,
        u32::MAX,
        None,
        true,
    )?;
    let service = ServiceType::new(Uuid::now_v7(), 30, 20_00, true)?;
    let windows = [window];

    Ok(SlotGenerator::default().generate(&SlotQuery {
        date,
        time_zone: &TimeZone::UTC,
        service: &service,
        windows: &windows,
        blocked: None,
        reservations: &[],
        not_before: Timestamp::UNIX_EPOCH,
    })?)
}
