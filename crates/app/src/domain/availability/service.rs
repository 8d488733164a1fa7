//! Availability service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use salon::blocks::BlockKind;

use crate::{
    database::Db,
    domain::availability::{
        data::{NewAvailabilityWindow, NewBlockedDate},
        errors::AvailabilityServiceError,
        records::{AvailabilityWindowRecord, BlockedDateRecord},
        repository::PgAvailabilityRepository,
    },
    settings::SalonSettings,
};

#[derive(Debug, Clone)]
pub struct PgAvailabilityService {
    db: Db,
    settings: SalonSettings,
    repository: PgAvailabilityRepository,
}

impl PgAvailabilityService {
    #[must_use]
    pub fn new(db: Db, settings: SalonSettings) -> Self {
        Self {
            db,
            settings,
            repository: PgAvailabilityRepository::new(),
        }
    }

    fn validate_window(
        &self,
        date: Date,
        window: &NewAvailabilityWindow,
    ) -> Result<(), AvailabilityServiceError> {
        if window.start_at >= window.end_at {
            return Err(AvailabilityServiceError::InvalidField {
                field: "end_at",
                reason: "must be after start_at",
            });
        }

        if window.max_slots == 0 {
            return Err(AvailabilityServiceError::InvalidField {
                field: "max_slots",
                reason: "must be at least 1",
            });
        }

        if window.start_at.to_zoned(self.settings.time_zone.clone()).date() != date {
            return Err(AvailabilityServiceError::InvalidField {
                field: "start_at",
                reason: "must fall on the requested date",
            });
        }

        Ok(())
    }
}

#[async_trait]
impl AvailabilityService for PgAvailabilityService {
    async fn list_windows(
        &self,
        date: Date,
    ) -> Result<Vec<AvailabilityWindowRecord>, AvailabilityServiceError> {
        let (from, until) = self.settings.day_bounds(date)?;

        let mut tx = self.db.begin_transaction().await?;

        let windows = self
            .repository
            .list_windows(&mut tx, self.settings.resource, from, until)
            .await?;

        tx.commit().await?;

        Ok(windows)
    }

    async fn replace_windows(
        &self,
        date: Date,
        windows: Vec<NewAvailabilityWindow>,
    ) -> Result<Vec<AvailabilityWindowRecord>, AvailabilityServiceError> {
        for window in &windows {
            self.validate_window(date, window)?;
        }

        let (from, until) = self.settings.day_bounds(date)?;

        let mut tx = self
            .db
            .begin_resource_transaction(self.settings.resource.into_uuid())
            .await?;

        self.repository
            .delete_windows(&mut tx, self.settings.resource, from, until)
            .await?;

        let mut created = Vec::with_capacity(windows.len());

        for window in &windows {
            created.push(
                self.repository
                    .create_window(&mut tx, self.settings.resource, window)
                    .await?,
            );
        }

        tx.commit().await?;

        created.sort_by_key(|window| (window.start_at, window.uuid));

        Ok(created)
    }

    async fn get_blocked_date(
        &self,
        date: Date,
    ) -> Result<Option<BlockedDateRecord>, AvailabilityServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let blocked = self.repository.get_blocked_date(&mut tx, date).await?;

        tx.commit().await?;

        Ok(blocked)
    }

    async fn create_blocked_date(
        &self,
        blocked: NewBlockedDate,
    ) -> Result<BlockedDateRecord, AvailabilityServiceError> {
        if let BlockKind::Partial { start, end } = blocked.kind
            && start >= end
        {
            return Err(AvailabilityServiceError::InvalidField {
                field: "end_time",
                reason: "must be after start_time",
            });
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_blocked_date(&mut tx, &blocked)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_blocked_date(&self, date: Date) -> Result<(), AvailabilityServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let deleted = self.repository.delete_blocked_date(&mut tx, date).await?;

        if deleted == 0 {
            return Err(AvailabilityServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Windows on `date` in the salon time zone, ordered by start.
    async fn list_windows(
        &self,
        date: Date,
    ) -> Result<Vec<AvailabilityWindowRecord>, AvailabilityServiceError>;

    /// Replaces every window on `date` with `windows`.
    async fn replace_windows(
        &self,
        date: Date,
        windows: Vec<NewAvailabilityWindow>,
    ) -> Result<Vec<AvailabilityWindowRecord>, AvailabilityServiceError>;

    /// The block on `date`, if any.
    async fn get_blocked_date(
        &self,
        date: Date,
    ) -> Result<Option<BlockedDateRecord>, AvailabilityServiceError>;

    /// Blocks a date, fully or partially. One block per date.
    async fn create_blocked_date(
        &self,
        blocked: NewBlockedDate,
    ) -> Result<BlockedDateRecord, AvailabilityServiceError>;

    /// Removes the block on `date`.
    async fn delete_blocked_date(&self, date: Date) -> Result<(), AvailabilityServiceError>;
}
