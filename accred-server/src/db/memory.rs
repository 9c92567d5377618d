//! In-memory [`Datastore`] for service and router tests

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use shared::models::{
    Accreditation, AccreditationCreate, AccreditationFilter, AccreditationStatus, AttendanceFlag,
    AttendanceRecord, Zone,
};

use super::{BoxError, Datastore};

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub actor: String,
    pub action: String,
    pub detail: Option<serde_json::Value>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: Vec<Accreditation>,
    attendance: BTreeMap<(i64, i32), bool>,
    audit: Vec<AuditEntry>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing the pending/no-zone defaults
    pub fn seed(&self, mut row: Accreditation) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        row.id = inner.next_id;
        if row.created_at == 0 {
            row.created_at = inner.next_id;
        }
        inner.rows.push(row);
        inner.next_id
    }

    /// Make every subsequent write fail with a database error
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Accreditation> {
        self.inner.lock().unwrap().rows.clone()
    }

    pub fn get(&self, id: i64) -> Option<Accreditation> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.inner.lock().unwrap().audit.clone()
    }

    fn check_writable(&self) -> Result<(), BoxError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("connection reset by peer".into());
        }
        Ok(())
    }
}

fn to_row(id: i64, row: &AccreditationCreate) -> Accreditation {
    Accreditation {
        id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        document: row.document.clone(),
        email: row.email.clone(),
        company: row.company.clone(),
        area: row.area,
        status: AccreditationStatus::Pending,
        zone: None,
        created_at: id,
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn insert_accreditation(
        &self,
        row: &AccreditationCreate,
    ) -> Result<Accreditation, BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let created = to_row(inner.next_id, row);
        inner.rows.push(created.clone());
        Ok(created)
    }

    async fn insert_accreditations(&self, rows: &[AccreditationCreate]) -> Result<u64, BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        for row in rows {
            inner.next_id += 1;
            let created = to_row(inner.next_id, row);
            inner.rows.push(created);
        }
        Ok(rows.len() as u64)
    }

    async fn list_accreditations(
        &self,
        filter: &AccreditationFilter,
    ) -> Result<Vec<Accreditation>, BoxError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Accreditation> = inner
            .rows
            .iter()
            .filter(|r| filter.area.is_none_or(|a| r.area == a))
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_accreditation(&self, id: i64) -> Result<Option<Accreditation>, BoxError> {
        Ok(self.get(id))
    }

    async fn find_accreditations(&self, ids: &[i64]) -> Result<Vec<Accreditation>, BoxError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn set_status(
        &self,
        ids: &[i64],
        status: AccreditationStatus,
    ) -> Result<u64, BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        let mut n = 0;
        for row in inner.rows.iter_mut().filter(|r| ids.contains(&r.id)) {
            row.status = status;
            n += 1;
        }
        Ok(n)
    }

    async fn approve_with_zone(&self, id: i64, zone: Zone) -> Result<u64, BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.status = AccreditationStatus::Approved;
                row.zone = Some(zone);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_zone(&self, id: i64, zone: Option<Zone>) -> Result<u64, BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.zone = zone;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_accreditations(&self, ids: &[i64]) -> Result<u64, BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| !ids.contains(&r.id));
        inner.attendance.retain(|(id, _), _| !ids.contains(id));
        Ok((before - inner.rows.len()) as u64)
    }

    async fn upsert_attendance(&self, record: &AttendanceRecord) -> Result<(), BoxError> {
        self.check_writable()?;
        let mut inner = self.inner.lock().unwrap();
        if !inner.rows.iter().any(|r| r.id == record.accreditation_id) {
            return Err(format!(
                "insert or update on table \"attendance\" violates foreign key constraint (accreditation_id={})",
                record.accreditation_id
            )
            .into());
        }
        inner
            .attendance
            .insert((record.accreditation_id, record.day), record.present);
        Ok(())
    }

    async fn attendance_for_day(
        &self,
        day: i32,
        ids: &[i64],
    ) -> Result<Vec<AttendanceFlag>, BoxError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .attendance
            .iter()
            .filter(|((id, d), _)| *d == day && ids.contains(id))
            .map(|((id, _), present)| AttendanceFlag {
                accreditation_id: *id,
                present: *present,
            })
            .collect())
    }

    async fn record_audit(
        &self,
        actor: &str,
        action: &str,
        detail: Option<&serde_json::Value>,
    ) -> Result<(), BoxError> {
        self.inner.lock().unwrap().audit.push(AuditEntry {
            actor: actor.to_string(),
            action: action.to_string(),
            detail: detail.cloned(),
        });
        Ok(())
    }
}
