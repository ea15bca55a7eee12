//! Storage seam used by the HTTP layer.
//!
//! Handlers only see [`BookingStore`], so they can be exercised against the
//! mockall double in [`crate::mock`] without a running Postgres.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use slotbook_core::{availability::is_slot_free, models::appointment::BookedInterval};
use uuid::Uuid;

use crate::{
    DbPool,
    models::{DbAppointment, DbBookedInterval, DbBusinessHours, DbFormField, DbProvider, DbService},
    repositories::{
        appointment::{self, NewAppointment},
        business_hours, form_field, provider, service,
    },
};

/// Result of a guarded booking attempt.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(DbAppointment),
    /// Another appointment took an overlapping interval first.
    SlotTaken,
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_provider_by_url(&self, custom_url: &str) -> Result<Option<DbProvider>>;

    async fn list_services(&self, provider_id: Uuid) -> Result<Vec<DbService>>;

    async fn find_service(&self, provider_id: Uuid, service_id: Uuid) -> Result<Option<DbService>>;

    async fn list_business_hours(&self, provider_id: Uuid) -> Result<Vec<DbBusinessHours>>;

    async fn list_form_fields(&self, provider_id: Uuid) -> Result<Vec<DbFormField>>;

    /// Time-reserving appointments between `from` and `to`, inclusive.
    async fn booked_intervals(
        &self,
        provider_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DbBookedInterval>>;

    /// Inserts the appointment and its form responses unless the interval
    /// overlaps an existing booking at commit time.
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<BookingOutcome>;
}

/// Postgres-backed [`BookingStore`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Re-checks `new` against the rows read under the provider lock.
fn slot_still_free(new: &NewAppointment, rows: Vec<DbBookedInterval>) -> Result<bool> {
    let booked: Vec<BookedInterval> = rows.into_iter().map(BookedInterval::from).collect();
    Ok(is_slot_free(new.start, new.duration_minutes, &booked)?)
}

#[async_trait]
impl BookingStore for PgStore {
    async fn find_provider_by_url(&self, custom_url: &str) -> Result<Option<DbProvider>> {
        provider::get_provider_by_url(&self.pool, custom_url).await
    }

    async fn list_services(&self, provider_id: Uuid) -> Result<Vec<DbService>> {
        service::get_services_by_provider_id(&self.pool, provider_id).await
    }

    async fn find_service(&self, provider_id: Uuid, service_id: Uuid) -> Result<Option<DbService>> {
        service::get_service_for_provider(&self.pool, provider_id, service_id).await
    }

    async fn list_business_hours(&self, provider_id: Uuid) -> Result<Vec<DbBusinessHours>> {
        business_hours::get_business_hours_by_provider_id(&self.pool, provider_id).await
    }

    async fn list_form_fields(&self, provider_id: Uuid) -> Result<Vec<DbFormField>> {
        form_field::get_form_fields_by_provider_id(&self.pool, provider_id).await
    }

    async fn booked_intervals(
        &self,
        provider_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DbBookedInterval>> {
        appointment::get_booked_intervals(&self.pool, provider_id, from, to).await
    }

    async fn create_appointment(&self, new: NewAppointment) -> Result<BookingOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent bookings for this provider until commit.
        appointment::lock_provider(&mut *tx, new.provider_id).await?;

        let booked =
            appointment::get_booked_intervals(&mut *tx, new.provider_id, new.date, new.date).await?;

        if !slot_still_free(&new, booked)? {
            tracing::info!(
                provider_id = %new.provider_id,
                date = %new.date,
                time = %new.start,
                "rejecting booking for an interval that is already taken"
            );
            tx.rollback().await?;
            return Ok(BookingOutcome::SlotTaken);
        }

        let created = appointment::create_appointment(&mut *tx, &new).await?;
        for (field_id, value) in &new.custom_fields {
            form_field::create_form_response(&mut *tx, created.id, *field_id, value).await?;
        }

        tx.commit().await?;
        tracing::info!(appointment_id = %created.id, "appointment created");

        Ok(BookingOutcome::Created(created))
    }
}
