//! Appointments Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use salon::status::AppointmentStatus;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::{
        appointments::{
            data::NewAppointment,
            records::{AppointmentRecord, AppointmentUuid},
        },
        service_types::records::ServiceTypeUuid,
    },
    identity::CustomerUuid,
    settings::ResourceUuid,
};

const GET_APPOINTMENT_SQL: &str = include_str!("sql/get_appointment.sql");
const GET_APPOINTMENT_FOR_UPDATE_SQL: &str = include_str!("sql/get_appointment_for_update.sql");
const FIND_BY_PAYMENT_REFERENCE_SQL: &str = include_str!("sql/find_by_payment_reference.sql");
const LIST_HELD_BETWEEN_SQL: &str = include_str!("sql/list_held_between.sql");
const OVERLAP_EXISTS_SQL: &str = include_str!("sql/overlap_exists.sql");
const CREATE_APPOINTMENT_SQL: &str = include_str!("sql/create_appointment.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const RECORD_PAYMENT_SQL: &str = include_str!("sql/record_payment.sql");
const SET_PAYMENT_REFERENCE_SQL: &str = include_str!("sql/set_payment_reference.sql");
const LIST_ELAPSED_PAID_SQL: &str = include_str!("sql/list_elapsed_paid.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAppointmentsRepository;

impl PgAppointmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_appointment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(GET_APPOINTMENT_SQL)
            .bind(appointment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an appointment and lock its row for the rest of the transaction.
    pub(crate) async fn get_appointment_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(GET_APPOINTMENT_FOR_UPDATE_SQL)
            .bind(appointment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_payment_reference(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment_reference: &str,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(FIND_BY_PAYMENT_REFERENCE_SQL)
            .bind(payment_reference)
            .fetch_one(&mut **tx)
            .await
    }

    /// Non-canceled appointments of `resource` intersecting `[from, until)`.
    pub(crate) async fn list_held_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        resource: ResourceUuid,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<AppointmentRecord>, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(LIST_HELD_BETWEEN_SQL)
            .bind(resource.into_uuid())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    /// Whether a non-canceled appointment other than `except` overlaps
    /// `[start, end)` on `resource`.
    pub(crate) async fn overlap_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        resource: ResourceUuid,
        start: Timestamp,
        end: Timestamp,
        except: Option<AppointmentUuid>,
    ) -> Result<bool, sqlx::Error> {
        let row = query(OVERLAP_EXISTS_SQL)
            .bind(resource.into_uuid())
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .bind(except.map(AppointmentUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await?;

        row.try_get("overlapping")
    }

    pub(crate) async fn create_appointment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: &NewAppointment,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(CREATE_APPOINTMENT_SQL)
            .bind(appointment.uuid.into_uuid())
            .bind(appointment.resource_uuid.into_uuid())
            .bind(appointment.customer_uuid.into_uuid())
            .bind(appointment.service_type_uuid.into_uuid())
            .bind(SqlxTimestamp::from(appointment.start_at))
            .bind(SqlxTimestamp::from(appointment.end_at))
            .bind(appointment.notes.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
        status: AppointmentStatus,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(UPDATE_STATUS_SQL)
            .bind(appointment.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Mark an appointment paid and store the settled amount.
    pub(crate) async fn record_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
        amount_paid: u64,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(RECORD_PAYMENT_SQL)
            .bind(appointment.into_uuid())
            .bind(amount_to_i64(amount_paid, "amount_paid")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_payment_reference(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        appointment: AppointmentUuid,
        payment_reference: &str,
    ) -> Result<AppointmentRecord, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(SET_PAYMENT_REFERENCE_SQL)
            .bind(appointment.into_uuid())
            .bind(payment_reference)
            .fetch_one(&mut **tx)
            .await
    }

    /// Paid appointments of `resource` that ended at or before `now`, locked.
    pub(crate) async fn list_elapsed_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        resource: ResourceUuid,
        now: Timestamp,
    ) -> Result<Vec<AppointmentRecord>, sqlx::Error> {
        query_as::<Postgres, AppointmentRecord>(LIST_ELAPSED_PAID_SQL)
            .bind(resource.into_uuid())
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AppointmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<&str, _>("status")?
            .parse::<AppointmentStatus>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(error),
            })?;

        Ok(Self {
            uuid: AppointmentUuid::from_uuid(row.try_get("uuid")?),
            resource_uuid: ResourceUuid::from_uuid(row.try_get("resource_uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            service_type_uuid: ServiceTypeUuid::from_uuid(row.try_get("service_type_uuid")?),
            start_at: row.try_get::<SqlxTimestamp, _>("start_at")?.to_jiff(),
            end_at: row.try_get::<SqlxTimestamp, _>("end_at")?.to_jiff(),
            status,
            payment_reference: row.try_get("payment_reference")?,
            amount_paid: try_get_amount(row, "amount_paid")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_queries_lock_rows_they_mutate() {
        assert!(GET_APPOINTMENT_FOR_UPDATE_SQL.contains("FOR UPDATE"));
        assert!(FIND_BY_PAYMENT_REFERENCE_SQL.contains("FOR UPDATE"));
        assert!(LIST_ELAPSED_PAID_SQL.contains("FOR UPDATE"));
        assert!(!GET_APPOINTMENT_SQL.contains("FOR UPDATE"));
    }

    #[test]
    fn held_queries_ignore_canceled_appointments() {
        assert!(LIST_HELD_BETWEEN_SQL.contains("status <> 'canceled'"));
        assert!(OVERLAP_EXISTS_SQL.contains("status <> 'canceled'"));
    }
}
