//! Subscriptions service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::subscriptions::{
        data::NewDeviceSubscription, errors::SubscriptionsServiceError,
        records::DeviceSubscriptionRecord, repository::PgSubscriptionsRepository,
    },
    identity::Principal,
};

#[derive(Debug, Clone)]
pub struct PgSubscriptionsService {
    db: Db,
    repository: PgSubscriptionsRepository,
}

impl PgSubscriptionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSubscriptionsRepository::new(),
        }
    }
}

#[async_trait]
impl SubscriptionsService for PgSubscriptionsService {
    async fn register(
        &self,
        principal: Principal,
        subscription: NewDeviceSubscription,
    ) -> Result<DeviceSubscriptionRecord, SubscriptionsServiceError> {
        if subscription.address.trim().is_empty() {
            return Err(SubscriptionsServiceError::InvalidData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_subscription(&mut tx, &principal, &subscription)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait SubscriptionsService: Send + Sync {
    /// Registers a delivery address for the caller. Admin callers receive
    /// salon-wide booking and payment notifications on it too.
    async fn register(
        &self,
        principal: Principal,
        subscription: NewDeviceSubscription,
    ) -> Result<DeviceSubscriptionRecord, SubscriptionsServiceError>;
}
