//! Test Helpers

use std::{
    error::Error,
    io,
    sync::{Arc, Mutex},
};

use jiff::{SignedDuration, Timestamp, civil::Date, tz::TimeZone};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use salon::status::AppointmentStatus;
use tokio::net::TcpListener;
use tracing::{Level, subscriber::DefaultGuard};

use crate::{
    domain::{
        appointments::{
            data::NewAppointment,
            records::{AppointmentRecord, AppointmentUuid},
            repository::PgAppointmentsRepository,
        },
        availability::data::NewAvailabilityWindow,
        service_types::{
            ServiceTypesService,
            data::NewServiceType,
            records::{ServiceTypeRecord, ServiceTypeUuid},
        },
    },
    identity::CustomerUuid,
    settings::ResourceUuid,
    test::TestContext,
};

type HelperResult<T> = Result<T, Box<dyn Error>>;

pub(crate) fn new_service_type(name: &str, duration_minutes: u32, price: u64) -> NewServiceType {
    NewServiceType {
        uuid: ServiceTypeUuid::new(),
        name: name.to_string(),
        category: "Hair".to_string(),
        duration_minutes,
        price,
    }
}

/// `hour:minute` on `day` in `tz`.
pub(crate) fn local(
    day: Date,
    hour: i8,
    minute: i8,
    tz: &TimeZone,
) -> Result<Timestamp, jiff::Error> {
    Ok(day.at(hour, minute, 0, 0).to_zoned(tz.clone())?.timestamp())
}

pub(crate) fn window_on(
    day: Date,
    tz: &TimeZone,
    from: (i8, i8),
    to: (i8, i8),
    max_slots: u32,
) -> Result<NewAvailabilityWindow, jiff::Error> {
    Ok(NewAvailabilityWindow {
        start_at: local(day, from.0, from.1, tz)?,
        end_at: local(day, to.0, to.1, tz)?,
        max_slots,
        service_types: None,
    })
}

/// A detached record starting at `start_at`, never persisted.
pub(crate) fn appointment_record(start_at: Timestamp) -> AppointmentRecord {
    AppointmentRecord {
        uuid: AppointmentUuid::new(),
        resource_uuid: ResourceUuid::new(),
        customer_uuid: CustomerUuid::new(),
        service_type_uuid: ServiceTypeUuid::new(),
        start_at,
        end_at: start_at
            .checked_add(SignedDuration::from_mins(30))
            .unwrap_or(start_at),
        status: AppointmentStatus::Paid,
        payment_reference: None,
        amount_paid: 0,
        notes: None,
        created_at: start_at,
        updated_at: start_at,
    }
}

/// Insert a booked appointment directly, bypassing the booking checks.
pub(crate) async fn seed_appointment_for(
    ctx: &TestContext,
    customer: CustomerUuid,
    service: &ServiceTypeRecord,
    start_at: Timestamp,
) -> HelperResult<AppointmentRecord> {
    let duration = SignedDuration::from_mins(i64::from(service.duration_minutes));
    let end_at = start_at.checked_add(duration)?;

    let mut tx = ctx.db.pool().begin().await?;

    let record = PgAppointmentsRepository::new()
        .create_appointment(
            &mut tx,
            &NewAppointment {
                uuid: AppointmentUuid::new(),
                resource_uuid: ctx.settings.resource,
                customer_uuid: customer,
                service_type_uuid: service.uuid,
                start_at,
                end_at,
                notes: None,
            },
        )
        .await?;

    tx.commit().await?;

    Ok(record)
}

/// Seed an hour-long appointment at `start_at`.
pub(crate) async fn seed_appointment_at(
    ctx: &TestContext,
    customer: CustomerUuid,
    start_at: Timestamp,
) -> HelperResult<AppointmentRecord> {
    let service = ctx
        .service_types
        .create_service_type(new_service_type("Seeded", 60, 50_00))
        .await?;

    seed_appointment_for(ctx, customer, &service, start_at).await
}

/// Seed an hour-long appointment an hour after the latest existing one.
pub(crate) async fn seed_appointment(
    ctx: &TestContext,
    customer: CustomerUuid,
) -> HelperResult<AppointmentRecord> {
    let latest: Option<SqlxTimestamp> = sqlx::query_scalar("SELECT MAX(end_at) FROM appointments")
        .fetch_one(ctx.db.pool())
        .await?;

    let start_at = match latest {
        Some(latest) => latest.to_jiff().checked_add(SignedDuration::from_hours(1))?,
        None => "2030-01-07T09:00:00Z".parse()?,
    };

    seed_appointment_at(ctx, customer, start_at).await
}

pub(crate) async fn set_status(
    ctx: &TestContext,
    appointment: AppointmentUuid,
    status: AppointmentStatus,
) -> Result<AppointmentRecord, sqlx::Error> {
    let mut tx = ctx.db.pool().begin().await?;

    let record = PgAppointmentsRepository::new()
        .update_status(&mut tx, appointment, status)
        .await?;

    tx.commit().await?;

    Ok(record)
}

pub(crate) async fn set_payment_reference(
    ctx: &TestContext,
    appointment: AppointmentUuid,
    payment_reference: &str,
) -> Result<AppointmentRecord, sqlx::Error> {
    let mut tx = ctx.db.pool().begin().await?;

    let record = PgAppointmentsRepository::new()
        .set_payment_reference(&mut tx, appointment, payment_reference)
        .await?;

    tx.commit().await?;

    Ok(record)
}

/// Address of a listener that accepts connections and never answers.
pub(crate) async fn silent_listener() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let mut held = Vec::new();

        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    Ok(format!("http://{addr}"))
}

/// Formatted log output written while the guard from [`capture_logs`] lives.
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(crate) fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_poisoned| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(bytes);

        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events into a buffer until the guard drops.
pub(crate) fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .with_writer(move || writer.clone())
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
