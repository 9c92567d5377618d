//! Audit log operations

use sqlx::PgPool;

use super::BoxError;

/// Write an audit log entry
pub async fn log(
    pool: &PgPool,
    actor: &str,
    action: &str,
    detail: Option<&serde_json::Value>,
    now: i64,
) -> Result<(), BoxError> {
    sqlx::query(
        "INSERT INTO audit_logs (actor, action, detail, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(actor)
    .bind(action)
    .bind(detail)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}
