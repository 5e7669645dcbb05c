//! The only local persistence this server owns: the SEP number column on an
//! appointment row. Everything else lives in the hosted database behind its
//! own row-level authentication.

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error::ApiError;

/// The SEP number stored against an appointment, if any.
///
/// Distinguishes a missing appointment (404) from an appointment without a
/// SEP (`None`).
pub async fn sep_number_for_appointment(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
) -> Result<Option<String>, ApiError> {
    let row = sqlx::query_scalar::<_, Option<String>>(
        "SELECT sep_number FROM appointments WHERE id = $1",
    )
    .bind(appointment_id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Err(ApiError::not_found(format!(
            "appointment {appointment_id} not found"
        ))),
        Some(sep_number) => Ok(sep_number),
    }
}

/// Record an issued SEP number on its appointment (single-column update).
pub async fn attach_sep_number(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    sep_number: &str,
) -> Result<(), ApiError> {
    let result = sqlx::query("UPDATE appointments SET sep_number = $2 WHERE id = $1")
        .bind(appointment_id)
        .bind(sep_number)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found(format!(
            "appointment {appointment_id} not found"
        )));
    }
    Ok(())
}

/// Clear the stored SEP number after the SEP was voided at the gateway.
pub async fn clear_sep_number(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
) -> Result<(), ApiError> {
    let result = sqlx::query("UPDATE appointments SET sep_number = NULL WHERE id = $1")
        .bind(appointment_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found(format!(
            "appointment {appointment_id} not found"
        )));
    }
    Ok(())
}
