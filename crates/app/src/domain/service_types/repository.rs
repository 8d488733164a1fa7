//! Service Types Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_to_i64, count_to_i32, try_get_amount, try_get_count},
    domain::service_types::{
        data::NewServiceType,
        records::{ServiceTypeRecord, ServiceTypeUuid},
    },
};

const LIST_SERVICE_TYPES_SQL: &str = include_str!("sql/list_service_types.sql");
const GET_SERVICE_TYPE_SQL: &str = include_str!("sql/get_service_type.sql");
const CREATE_SERVICE_TYPE_SQL: &str = include_str!("sql/create_service_type.sql");
const DEACTIVATE_SERVICE_TYPE_SQL: &str = include_str!("sql/deactivate_service_type.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgServiceTypesRepository;

impl PgServiceTypesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_service_types(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        include_inactive: bool,
    ) -> Result<Vec<ServiceTypeRecord>, sqlx::Error> {
        query_as::<Postgres, ServiceTypeRecord>(LIST_SERVICE_TYPES_SQL)
            .bind(include_inactive)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_service_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, sqlx::Error> {
        query_as::<Postgres, ServiceTypeRecord>(GET_SERVICE_TYPE_SQL)
            .bind(service_type.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_service_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_type: &NewServiceType,
    ) -> Result<ServiceTypeRecord, sqlx::Error> {
        query_as::<Postgres, ServiceTypeRecord>(CREATE_SERVICE_TYPE_SQL)
            .bind(service_type.uuid.into_uuid())
            .bind(&service_type.name)
            .bind(&service_type.category)
            .bind(count_to_i32(service_type.duration_minutes, "duration_minutes")?)
            .bind(amount_to_i64(service_type.price, "price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn deactivate_service_type(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_type: ServiceTypeUuid,
    ) -> Result<ServiceTypeRecord, sqlx::Error> {
        query_as::<Postgres, ServiceTypeRecord>(DEACTIVATE_SERVICE_TYPE_SQL)
            .bind(service_type.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ServiceTypeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ServiceTypeUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            duration_minutes: try_get_count(row, "duration_minutes")?,
            price: try_get_amount(row, "price")?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
