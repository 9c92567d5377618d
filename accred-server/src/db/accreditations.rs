//! Accreditation request queries

use shared::models::{
    Accreditation, AccreditationCreate, AccreditationFilter, AccreditationStatus, Zone,
};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::BoxError;

const SELECT_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, document, email, company,
           area, status, zone, created_at
    FROM accreditations
"#;

pub async fn insert(
    pool: &PgPool,
    row: &AccreditationCreate,
    now: i64,
) -> Result<Accreditation, BoxError> {
    let created: Accreditation = sqlx::query_as(
        r#"
        INSERT INTO accreditations (
            first_name, last_name, document, email, company, area, status, zone, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, NULL, $8)
        RETURNING id, first_name, last_name, document, email, company,
                  area, status, zone, created_at
        "#,
    )
    .bind(&row.first_name)
    .bind(&row.last_name)
    .bind(&row.document)
    .bind(&row.email)
    .bind(&row.company)
    .bind(row.area)
    .bind(AccreditationStatus::Pending)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(created)
}

/// Multi-row INSERTs of `chunk_size` rows, all in one transaction.
pub async fn insert_batch(
    pool: &PgPool,
    rows: &[AccreditationCreate],
    chunk_size: usize,
    now: i64,
) -> Result<u64, BoxError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for chunk in rows.chunks(chunk_size.max(1)) {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO accreditations \
             (first_name, last_name, document, email, company, area, status, zone, created_at) ",
        );
        qb.push_values(chunk, |mut b, row| {
            b.push_bind(&row.first_name)
                .push_bind(&row.last_name)
                .push_bind(&row.document)
                .push_bind(&row.email)
                .push_bind(&row.company)
                .push_bind(row.area)
                .push_bind(AccreditationStatus::Pending)
                .push_bind(None::<Zone>)
                .push_bind(now);
        });
        inserted += qb.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

pub async fn list(
    pool: &PgPool,
    filter: &AccreditationFilter,
) -> Result<Vec<Accreditation>, BoxError> {
    let sql = format!(
        "{SELECT_COLUMNS}
         WHERE ($1::accreditation_area IS NULL OR area = $1)
           AND ($2::accreditation_status IS NULL OR status = $2)
         ORDER BY created_at DESC, id DESC"
    );
    let rows: Vec<Accreditation> = sqlx::query_as(&sql)
        .bind(filter.area)
        .bind(filter.status)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Accreditation>, BoxError> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
    let row: Option<Accreditation> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row)
}

pub async fn find_by_ids(pool: &PgPool, ids: &[i64]) -> Result<Vec<Accreditation>, BoxError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let sql = format!("{SELECT_COLUMNS} WHERE id = ANY($1) ORDER BY created_at DESC, id DESC");
    let rows: Vec<Accreditation> = sqlx::query_as(&sql).bind(ids).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn update_status(
    pool: &PgPool,
    ids: &[i64],
    status: AccreditationStatus,
) -> Result<u64, BoxError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let rows = sqlx::query("UPDATE accreditations SET status = $1 WHERE id = ANY($2)")
        .bind(status)
        .bind(ids)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn approve_with_zone(pool: &PgPool, id: i64, zone: Zone) -> Result<u64, BoxError> {
    let rows = sqlx::query("UPDATE accreditations SET status = $1, zone = $2 WHERE id = $3")
        .bind(AccreditationStatus::Approved)
        .bind(zone)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn update_zone(pool: &PgPool, id: i64, zone: Option<Zone>) -> Result<u64, BoxError> {
    let rows = sqlx::query("UPDATE accreditations SET zone = $1 WHERE id = $2")
        .bind(zone)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_many(pool: &PgPool, ids: &[i64]) -> Result<u64, BoxError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let rows = sqlx::query("DELETE FROM accreditations WHERE id = ANY($1)")
        .bind(ids)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
