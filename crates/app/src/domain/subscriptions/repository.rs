//! Device Subscriptions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    domain::subscriptions::{
        data::NewDeviceSubscription,
        records::{DeviceSubscriptionRecord, DeviceSubscriptionUuid},
    },
    identity::{CustomerUuid, Principal},
};

const CREATE_SUBSCRIPTION_SQL: &str = include_str!("sql/create_subscription.sql");
const LIST_RECIPIENTS_SQL: &str = include_str!("sql/list_recipients.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubscriptionsRepository;

impl PgSubscriptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subscriber: &Principal,
        subscription: &NewDeviceSubscription,
    ) -> Result<DeviceSubscriptionRecord, sqlx::Error> {
        query_as::<Postgres, DeviceSubscriptionRecord>(CREATE_SUBSCRIPTION_SQL)
            .bind(DeviceSubscriptionUuid::new().into_uuid())
            .bind(subscriber.customer.into_uuid())
            .bind(subscriber.is_admin)
            .bind(subscription.address.trim())
            .fetch_one(&mut **tx)
            .await
    }

    /// Subscriptions of `customer`, plus every admin subscription when
    /// `include_admins` is set.
    pub(crate) async fn list_recipients(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        include_admins: bool,
    ) -> Result<Vec<DeviceSubscriptionRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceSubscriptionRecord>(LIST_RECIPIENTS_SQL)
            .bind(customer.into_uuid())
            .bind(include_admins)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for DeviceSubscriptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DeviceSubscriptionUuid::from_uuid(row.try_get("uuid")?),
            subscriber_uuid: CustomerUuid::from_uuid(row.try_get("subscriber_uuid")?),
            is_admin: row.try_get("is_admin")?,
            address: row.try_get("address")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
