//! Attendance operations

use shared::models::{AttendanceFlag, AttendanceRecord};
use sqlx::PgPool;

use super::BoxError;

pub async fn upsert(pool: &PgPool, record: &AttendanceRecord, now: i64) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        INSERT INTO attendance (accreditation_id, day, present, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (accreditation_id, day)
        DO UPDATE SET present = EXCLUDED.present, updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(record.accreditation_id)
    .bind(record.day)
    .bind(record.present)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn for_day(pool: &PgPool, day: i32, ids: &[i64]) -> Result<Vec<AttendanceFlag>, BoxError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let rows: Vec<AttendanceFlag> = sqlx::query_as(
        "SELECT accreditation_id, present FROM attendance WHERE day = $1 AND accreditation_id = ANY($2)",
    )
    .bind(day)
    .bind(ids)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
