//! Daily attendance checks

use shared::error::{AppError, ErrorCode};
use shared::models::{AttendanceFlag, AttendanceRecord};

use crate::db::Datastore;
use crate::error::ServiceResult;

/// Accept `day` only within `1..=event_days`
pub fn check_day(day: i32, event_days: i32) -> Result<i32, AppError> {
    if (1..=event_days).contains(&day) {
        Ok(day)
    } else {
        Err(AppError::new(ErrorCode::InvalidAttendanceDay)
            .with_detail("day", day)
            .with_detail("event_days", event_days))
    }
}

/// Positive ids from a comma-separated list; anything else is dropped.
pub fn parse_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .collect()
}

pub async fn record(
    store: &dyn Datastore,
    record: &AttendanceRecord,
    event_days: i32,
) -> ServiceResult<()> {
    check_day(record.day, event_days)?;
    if record.accreditation_id <= 0 {
        return Err(AppError::validation("accreditation_id must be positive").into());
    }
    store.upsert_attendance(record).await?;
    tracing::debug!(
        accreditation_id = record.accreditation_id,
        day = record.day,
        present = record.present,
        "Attendance recorded"
    );
    Ok(())
}

/// Flags for the given ids on one day. No query when `ids` is empty.
pub async fn flags_for_day(
    store: &dyn Datastore,
    day: i32,
    ids: &[i64],
    event_days: i32,
) -> ServiceResult<Vec<AttendanceFlag>> {
    check_day(day, event_days)?;
    if ids.is_empty() {
        return Ok(vec![]);
    }
    Ok(store.attendance_for_day(day, ids).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use shared::models::{Accreditation, AccreditationStatus, Area};

    fn seed(store: &MemoryStore) -> i64 {
        store.seed(Accreditation {
            id: 0,
            first_name: "Juan".into(),
            last_name: "Perez".into(),
            document: String::new(),
            email: "juan@example.com".into(),
            company: None,
            area: Area::Press,
            status: AccreditationStatus::Approved,
            zone: None,
            created_at: 0,
        })
    }

    #[test]
    fn test_parse_ids_drops_garbage() {
        assert_eq!(parse_ids("1,2,3"), vec![1, 2, 3]);
        assert_eq!(parse_ids(" 4 , x, -1, 0, 5,,"), vec![4, 5]);
        assert!(parse_ids("").is_empty());
    }

    #[test]
    fn test_check_day_bounds() {
        assert!(check_day(1, 8).is_ok());
        assert!(check_day(8, 8).is_ok());
        assert_eq!(check_day(0, 8).unwrap_err().code, ErrorCode::InvalidAttendanceDay);
        assert_eq!(check_day(9, 8).unwrap_err().code, ErrorCode::InvalidAttendanceDay);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_flag() {
        let store = MemoryStore::new();
        let id = seed(&store);
        let mut rec = AttendanceRecord {
            accreditation_id: id,
            day: 3,
            present: true,
        };
        record(&store, &rec, 8).await.unwrap();
        rec.present = false;
        record(&store, &rec, 8).await.unwrap();

        let flags = flags_for_day(&store, 3, &[id], 8).await.unwrap();
        assert_eq!(
            flags,
            vec![AttendanceFlag {
                accreditation_id: id,
                present: false
            }]
        );
        assert!(flags_for_day(&store, 4, &[id], 8).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_ids_skip_query() {
        let store = MemoryStore::new();
        store.fail_writes();
        assert!(flags_for_day(&store, 1, &[], 8).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_day_rejected() {
        let store = MemoryStore::new();
        let id = seed(&store);
        let rec = AttendanceRecord {
            accreditation_id: id,
            day: 9,
            present: true,
        };
        let err = AppError::from(record(&store, &rec, 8).await.unwrap_err());
        assert_eq!(err.code, ErrorCode::InvalidAttendanceDay);
    }
}
