//! Database access layer
//!
//! Handlers and services talk to the [`Datastore`] trait; [`PgDatastore`]
//! is the PostgreSQL implementation backed by the free functions in the
//! submodules.

pub mod accreditations;
pub mod attendance;
pub mod audit;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use shared::models::{
    Accreditation, AccreditationCreate, AccreditationFilter, AccreditationStatus, AttendanceFlag,
    AttendanceRecord, Zone,
};
use sqlx::PgPool;

pub use crate::error::BoxError;

/// Rows per INSERT statement during bulk import
pub const INSERT_CHUNK_SIZE: usize = 500;

/// Relational store for accreditations, attendance and the admin audit log.
///
/// Every multi-row mutation is a single statement: either all ids change or
/// none do.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn insert_accreditation(&self, row: &AccreditationCreate)
    -> Result<Accreditation, BoxError>;

    /// Insert all rows (pending, no zone) in chunks of `INSERT_CHUNK_SIZE`
    /// inside one transaction. Returns the number of rows inserted.
    async fn insert_accreditations(&self, rows: &[AccreditationCreate]) -> Result<u64, BoxError>;

    /// Newest first
    async fn list_accreditations(
        &self,
        filter: &AccreditationFilter,
    ) -> Result<Vec<Accreditation>, BoxError>;

    async fn get_accreditation(&self, id: i64) -> Result<Option<Accreditation>, BoxError>;

    async fn find_accreditations(&self, ids: &[i64]) -> Result<Vec<Accreditation>, BoxError>;

    async fn set_status(&self, ids: &[i64], status: AccreditationStatus)
    -> Result<u64, BoxError>;

    /// Mark approved and store the zone in one update
    async fn approve_with_zone(&self, id: i64, zone: Zone) -> Result<u64, BoxError>;

    async fn set_zone(&self, id: i64, zone: Option<Zone>) -> Result<u64, BoxError>;

    async fn delete_accreditations(&self, ids: &[i64]) -> Result<u64, BoxError>;

    /// Insert or overwrite the flag for `(accreditation_id, day)`
    async fn upsert_attendance(&self, record: &AttendanceRecord) -> Result<(), BoxError>;

    async fn attendance_for_day(
        &self,
        day: i32,
        ids: &[i64],
    ) -> Result<Vec<AttendanceFlag>, BoxError>;

    async fn record_audit(
        &self,
        actor: &str,
        action: &str,
        detail: Option<&serde_json::Value>,
    ) -> Result<(), BoxError>;
}

/// PostgreSQL-backed [`Datastore`]
#[derive(Clone)]
pub struct PgDatastore {
    pool: PgPool,
}

impl PgDatastore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Datastore for PgDatastore {
    async fn insert_accreditation(
        &self,
        row: &AccreditationCreate,
    ) -> Result<Accreditation, BoxError> {
        accreditations::insert(&self.pool, row, shared::util::now_millis()).await
    }

    async fn insert_accreditations(&self, rows: &[AccreditationCreate]) -> Result<u64, BoxError> {
        accreditations::insert_batch(
            &self.pool,
            rows,
            INSERT_CHUNK_SIZE,
            shared::util::now_millis(),
        )
        .await
    }

    async fn list_accreditations(
        &self,
        filter: &AccreditationFilter,
    ) -> Result<Vec<Accreditation>, BoxError> {
        accreditations::list(&self.pool, filter).await
    }

    async fn get_accreditation(&self, id: i64) -> Result<Option<Accreditation>, BoxError> {
        accreditations::find_by_id(&self.pool, id).await
    }

    async fn find_accreditations(&self, ids: &[i64]) -> Result<Vec<Accreditation>, BoxError> {
        accreditations::find_by_ids(&self.pool, ids).await
    }

    async fn set_status(
        &self,
        ids: &[i64],
        status: AccreditationStatus,
    ) -> Result<u64, BoxError> {
        accreditations::update_status(&self.pool, ids, status).await
    }

    async fn approve_with_zone(&self, id: i64, zone: Zone) -> Result<u64, BoxError> {
        accreditations::approve_with_zone(&self.pool, id, zone).await
    }

    async fn set_zone(&self, id: i64, zone: Option<Zone>) -> Result<u64, BoxError> {
        accreditations::update_zone(&self.pool, id, zone).await
    }

    async fn delete_accreditations(&self, ids: &[i64]) -> Result<u64, BoxError> {
        accreditations::delete_many(&self.pool, ids).await
    }

    async fn upsert_attendance(&self, record: &AttendanceRecord) -> Result<(), BoxError> {
        attendance::upsert(&self.pool, record, shared::util::now_millis()).await
    }

    async fn attendance_for_day(
        &self,
        day: i32,
        ids: &[i64],
    ) -> Result<Vec<AttendanceFlag>, BoxError> {
        attendance::for_day(&self.pool, day, ids).await
    }

    async fn record_audit(
        &self,
        actor: &str,
        action: &str,
        detail: Option<&serde_json::Value>,
    ) -> Result<(), BoxError> {
        audit::log(&self.pool, actor, action, detail, shared::util::now_millis()).await
    }
}
