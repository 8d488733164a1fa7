//! Availability Repository

use jiff::{Timestamp, civil::Date};
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime, Timestamp as SqlxTimestamp};
use salon::blocks::BlockKind;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{count_to_i32, try_get_count},
    domain::{
        availability::{
            data::{NewAvailabilityWindow, NewBlockedDate},
            records::{
                AvailabilityWindowRecord, AvailabilityWindowUuid, BlockedDateRecord,
                BlockedDateUuid,
            },
        },
        service_types::records::ServiceTypeUuid,
    },
    settings::ResourceUuid,
};

const LIST_WINDOWS_SQL: &str = include_str!("sql/list_windows.sql");
const DELETE_WINDOWS_SQL: &str = include_str!("sql/delete_windows.sql");
const CREATE_WINDOW_SQL: &str = include_str!("sql/create_window.sql");
const GET_BLOCKED_DATE_SQL: &str = include_str!("sql/get_blocked_date.sql");
const CREATE_BLOCKED_DATE_SQL: &str = include_str!("sql/create_blocked_date.sql");
const DELETE_BLOCKED_DATE_SQL: &str = include_str!("sql/delete_blocked_date.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAvailabilityRepository;

impl PgAvailabilityRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Windows for `resource` starting within `[from, until)`.
    pub(crate) async fn list_windows(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        resource: ResourceUuid,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<AvailabilityWindowRecord>, sqlx::Error> {
        query_as::<Postgres, AvailabilityWindowRecord>(LIST_WINDOWS_SQL)
            .bind(resource.into_uuid())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(until))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_windows(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        resource: ResourceUuid,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_WINDOWS_SQL)
            .bind(resource.into_uuid())
            .bind(SqlxTimestamp::from(from))
            .bind(SqlxTimestamp::from(until))
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub(crate) async fn create_window(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        resource: ResourceUuid,
        window: &NewAvailabilityWindow,
    ) -> Result<AvailabilityWindowRecord, sqlx::Error> {
        let service_types: Option<Vec<Uuid>> = window
            .service_types
            .as_ref()
            .map(|allowed| allowed.iter().map(|uuid| uuid.into_uuid()).collect());

        query_as::<Postgres, AvailabilityWindowRecord>(CREATE_WINDOW_SQL)
            .bind(AvailabilityWindowUuid::new().into_uuid())
            .bind(resource.into_uuid())
            .bind(SqlxTimestamp::from(window.start_at))
            .bind(SqlxTimestamp::from(window.end_at))
            .bind(count_to_i32(window.max_slots, "max_slots")?)
            .bind(service_types)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_blocked_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: Date,
    ) -> Result<Option<BlockedDateRecord>, sqlx::Error> {
        query_as::<Postgres, BlockedDateRecord>(GET_BLOCKED_DATE_SQL)
            .bind(SqlxDate::from(date))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_blocked_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        blocked: &NewBlockedDate,
    ) -> Result<BlockedDateRecord, sqlx::Error> {
        let (start_time, end_time) = match blocked.kind {
            BlockKind::FullDay => (None, None),
            BlockKind::Partial { start, end } => {
                (Some(SqlxTime::from(start)), Some(SqlxTime::from(end)))
            }
        };

        query_as::<Postgres, BlockedDateRecord>(CREATE_BLOCKED_DATE_SQL)
            .bind(BlockedDateUuid::new().into_uuid())
            .bind(SqlxDate::from(blocked.date))
            .bind(start_time)
            .bind(end_time)
            .bind(blocked.reason.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_blocked_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: Date,
    ) -> Result<u64, sqlx::Error> {
        let result = query(DELETE_BLOCKED_DATE_SQL)
            .bind(SqlxDate::from(date))
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }
}

impl<'r> FromRow<'r, PgRow> for AvailabilityWindowRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let service_types = row
            .try_get::<Option<Vec<Uuid>>, _>("service_types")?
            .map(|allowed| allowed.into_iter().map(ServiceTypeUuid::from_uuid).collect());

        Ok(Self {
            uuid: AvailabilityWindowUuid::from_uuid(row.try_get("uuid")?),
            resource_uuid: ResourceUuid::from_uuid(row.try_get("resource_uuid")?),
            start_at: row.try_get::<SqlxTimestamp, _>("start_at")?.to_jiff(),
            end_at: row.try_get::<SqlxTimestamp, _>("end_at")?.to_jiff(),
            max_slots: try_get_count(row, "max_slots")?,
            service_types,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for BlockedDateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let start = row.try_get::<Option<SqlxTime>, _>("start_time")?;
        let end = row.try_get::<Option<SqlxTime>, _>("end_time")?;

        let kind = match (start, end) {
            (None, None) => BlockKind::FullDay,
            (Some(start), Some(end)) => BlockKind::Partial {
                start: start.to_jiff(),
                end: end.to_jiff(),
            },
            _ => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "start_time".to_string(),
                    source: "partial block needs both start_time and end_time".into(),
                });
            }
        };

        Ok(Self {
            uuid: BlockedDateUuid::from_uuid(row.try_get("uuid")?),
            date: row.try_get::<SqlxDate, _>("blocked_on")?.to_jiff(),
            kind,
            reason: row.try_get("reason")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
