use crate::models::{DbAppointment, DbBookedInterval};
use chrono::NaiveDate;
use eyre::Result;
use slotbook_core::{models::appointment::AppointmentStatus, time_of_day::TimeOfDay};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Fields needed to insert a new appointment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub provider_id: Uuid,
    pub service_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    /// Duration of the booked service, used by the overlap re-check.
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub custom_fields: Vec<(Uuid, String)>,
}

/// Stored status values whose appointments still block their interval.
fn reserving_statuses() -> Vec<&'static str> {
    AppointmentStatus::ALL
        .into_iter()
        .filter(|status| status.reserves_time())
        .map(AppointmentStatus::as_str)
        .collect()
}

/// Returns the time-reserving appointments of a provider between `from` and
/// `to` inclusive, each paired with the duration of its own service.
pub async fn get_booked_intervals<'e>(
    executor: impl PgExecutor<'e>,
    provider_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbBookedInterval>> {
    tracing::debug!(
        "Getting booked intervals for provider {} from {} to {}",
        provider_id,
        from,
        to
    );

    let intervals = sqlx::query_as::<_, DbBookedInterval>(
        r#"
        SELECT a.date, a.time, s.duration
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        WHERE a.provider_id = $1
          AND a.date BETWEEN $2 AND $3
          AND a.status = ANY($4)
        ORDER BY a.date ASC, a.time ASC
        "#,
    )
    .bind(provider_id)
    .bind(from)
    .bind(to)
    .bind(reserving_statuses())
    .fetch_all(executor)
    .await?;

    Ok(intervals)
}

pub async fn create_appointment<'e>(
    executor: impl PgExecutor<'e>,
    appointment: &NewAppointment,
) -> Result<DbAppointment> {
    tracing::debug!(
        "Creating appointment for provider {} on {} at {}",
        appointment.provider_id,
        appointment.date,
        appointment.start
    );

    let created = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (provider_id, service_id, customer_name, customer_email, customer_phone,
             date, time, notes, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, provider_id, service_id, customer_name, customer_email,
                  customer_phone, date, time, notes, status, created_at
        "#,
    )
    .bind(appointment.provider_id)
    .bind(appointment.service_id)
    .bind(&appointment.customer_name)
    .bind(&appointment.customer_email)
    .bind(&appointment.customer_phone)
    .bind(appointment.date)
    .bind(appointment.start.to_string())
    .bind(&appointment.notes)
    .bind(AppointmentStatus::Confirmed.as_str())
    .fetch_one(executor)
    .await?;

    Ok(created)
}

/// Takes a row lock on the provider so concurrent bookings for the same
/// provider are serialized until the surrounding transaction ends.
pub async fn lock_provider<'e>(executor: impl PgExecutor<'e>, provider_id: Uuid) -> Result<()> {
    sqlx::query("SELECT id FROM providers WHERE id = $1 FOR UPDATE")
        .bind(provider_id)
        .execute(executor)
        .await?;

    Ok(())
}
