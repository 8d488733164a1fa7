//! Slots service.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use mockall::automock;
use salon::slots::{Slot, SlotQuery};

use crate::{
    database::Db,
    domain::{
        appointments::repository::PgAppointmentsRepository,
        availability::repository::PgAvailabilityRepository,
        service_types::{records::ServiceTypeUuid, repository::PgServiceTypesRepository},
        slots::errors::SlotsServiceError,
    },
    settings::SalonSettings,
};

#[derive(Debug, Clone)]
pub struct PgSlotsService {
    db: Db,
    settings: SalonSettings,
    service_types: PgServiceTypesRepository,
    availability: PgAvailabilityRepository,
    appointments: PgAppointmentsRepository,
}

impl PgSlotsService {
    #[must_use]
    pub fn new(db: Db, settings: SalonSettings) -> Self {
        Self {
            db,
            settings,
            service_types: PgServiceTypesRepository::new(),
            availability: PgAvailabilityRepository::new(),
            appointments: PgAppointmentsRepository::new(),
        }
    }
}

#[async_trait]
impl SlotsService for PgSlotsService {
    #[tracing::instrument(
        name = "slots.service.available_slots",
        skip(self),
        fields(slot_count = tracing::field::Empty),
        err
    )]
    async fn available_slots(
        &self,
        date: Date,
        service_type: ServiceTypeUuid,
        now: Timestamp,
    ) -> Result<Vec<Slot>, SlotsServiceError> {
        let (day_start, day_end) = self.settings.day_bounds(date)?;
        let resource = self.settings.resource;

        let mut tx = self.db.begin_transaction().await?;

        let service = self
            .service_types
            .get_service_type(&mut tx, service_type)
            .await?;

        if !service.active {
            return Err(SlotsServiceError::ServiceTypeNotFound);
        }

        let windows = self
            .availability
            .list_windows(&mut tx, resource, day_start, day_end)
            .await?;

        let blocked = self.availability.get_blocked_date(&mut tx, date).await?;

        // Windows may run past midnight; reservations are read to their end.
        let horizon = windows
            .iter()
            .map(|window| window.end_at)
            .fold(day_end, Timestamp::max);

        let held = self
            .appointments
            .list_held_between(&mut tx, resource, day_start, horizon)
            .await?;

        tx.commit().await?;

        let service = service.to_service_type()?;
        let windows = windows
            .iter()
            .map(|window| window.to_window())
            .collect::<Result<Vec<_>, _>>()?;
        let blocked = blocked
            .map(|blocked| blocked.to_blocked_date())
            .transpose()?;
        let reservations = held
            .iter()
            .map(|appointment| appointment.reservation())
            .collect::<Result<Vec<_>, _>>()?;

        let slots = self.settings.slots.generate(&SlotQuery {
            date,
            time_zone: &self.settings.time_zone,
            service: &service,
            windows: &windows,
            blocked: blocked.as_ref(),
            reservations: &reservations,
            not_before: now,
        })?;

        tracing::Span::current().record("slot_count", slots.len());

        Ok(slots)
    }
}

#[automock]
#[async_trait]
pub trait SlotsService: Send + Sync {
    /// Bookable slots for `service_type` on `date`, all starting after `now`.
    async fn available_slots(
        &self,
        date: Date,
        service_type: ServiceTypeUuid,
        now: Timestamp,
    ) -> Result<Vec<Slot>, SlotsServiceError>;
}
