//! Administrative review operations
//!
//! Every mutation writes an audit entry for the acting admin. Audit
//! failures are logged and never fail the action itself.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Accreditation, AccreditationFilter, AccreditationStatus, Zone};
use shared::util::contains_ignore_case;

use crate::db::Datastore;
use crate::email::{ApprovalNotice, Mailer};
use crate::error::ServiceResult;

/// Outcome of a bulk status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkStatusOutcome {
    pub updated: u64,
    /// Selected records left unchanged because they have no zone
    pub skipped: usize,
}

/// Outcome of a batch approval email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationOutcome {
    pub sent: usize,
    /// Selected records that are not approved or have no zone
    pub omitted: usize,
    /// Recipients the provider rejected within an accepted batch
    pub failed: usize,
}

pub(crate) async fn audit(store: &dyn Datastore, actor: &str, action: &str, detail: serde_json::Value) {
    if let Err(e) = store.record_audit(actor, action, Some(&detail)).await {
        tracing::warn!(error = %e, action, "Failed to write audit log");
    }
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::AccreditationNotFound).with_detail("id", id)
}

fn require_selection(ids: &[i64]) -> ServiceResult<Vec<i64>> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Err(AppError::new(ErrorCode::NoSelection).into());
    }
    Ok(ids)
}

/// Free-text match over name, surname, document, email and company.
pub fn matches_query(row: &Accreditation, needle_lower: &str) -> bool {
    [
        row.first_name.as_str(),
        row.last_name.as_str(),
        row.document.as_str(),
        row.email.as_str(),
        row.company.as_deref().unwrap_or_default(),
    ]
    .into_iter()
    .any(|field| contains_ignore_case(field, needle_lower))
}

/// Rows matching the exact filters and, when given, the free-text query.
/// Newest first.
pub async fn search(
    store: &dyn Datastore,
    filter: &AccreditationFilter,
    query: Option<&str>,
) -> ServiceResult<Vec<Accreditation>> {
    let mut rows = store.list_accreditations(filter).await?;

    if let Some(needle) = query.map(str::trim).filter(|q| !q.is_empty()) {
        let needle = needle.to_lowercase();
        rows.retain(|row| matches_query(row, &needle));
    }
    Ok(rows)
}

/// Single status transition.
///
/// Approval uses `zone` or, failing that, the stored zone; with neither the
/// request is refused and nothing is written.
pub async fn change_status(
    store: &dyn Datastore,
    actor: &str,
    id: i64,
    status: AccreditationStatus,
    zone: Option<Zone>,
) -> ServiceResult<Accreditation> {
    let current = store.get_accreditation(id).await?.ok_or_else(|| not_found(id))?;

    match status {
        AccreditationStatus::Approved => {
            let zone = zone.or(current.zone).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ZoneRequired,
                    "Assign a zone before approving this accreditation",
                )
                .with_detail("id", id)
            })?;
            store.approve_with_zone(id, zone).await?;
        }
        other => {
            store.set_status(&[id], other).await?;
        }
    }

    let updated = store.get_accreditation(id).await?.ok_or_else(|| not_found(id))?;
    audit(
        store,
        actor,
        "accreditation.status",
        serde_json::json!({ "id": id, "status": updated.status, "zone": updated.zone }),
    )
    .await;
    Ok(updated)
}

/// Assign or clear a zone. No approval checks.
pub async fn assign_zone(
    store: &dyn Datastore,
    actor: &str,
    id: i64,
    zone: Option<Zone>,
) -> ServiceResult<Accreditation> {
    if store.set_zone(id, zone).await? == 0 {
        return Err(not_found(id).into());
    }
    let updated = store.get_accreditation(id).await?.ok_or_else(|| not_found(id))?;
    audit(store, actor, "accreditation.zone", serde_json::json!({ "id": id, "zone": zone })).await;
    Ok(updated)
}

pub async fn delete(store: &dyn Datastore, actor: &str, id: i64) -> ServiceResult<()> {
    if store.delete_accreditations(&[id]).await? == 0 {
        return Err(not_found(id).into());
    }
    audit(store, actor, "accreditation.delete", serde_json::json!({ "id": id })).await;
    Ok(())
}

/// Change the status of every selected record in one update.
///
/// Approval only touches records that already have a zone; the rest are
/// counted as skipped. If none has a zone the request is refused.
pub async fn bulk_change_status(
    store: &dyn Datastore,
    actor: &str,
    ids: &[i64],
    status: AccreditationStatus,
) -> ServiceResult<BulkStatusOutcome> {
    let ids = require_selection(ids)?;

    let outcome = if status == AccreditationStatus::Approved {
        let zoned: Vec<i64> = store
            .find_accreditations(&ids)
            .await?
            .into_iter()
            .filter(|row| row.zone.is_some())
            .map(|row| row.id)
            .collect();

        if zoned.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::ZoneRequired,
                "None of the selected accreditations has a zone assigned",
            )
            .into());
        }

        let updated = store.set_status(&zoned, status).await?;
        let skipped = ids.len() - zoned.len();
        if skipped > 0 {
            tracing::warn!(skipped, "Bulk approval skipped records without zone");
        }
        BulkStatusOutcome { updated, skipped }
    } else {
        BulkStatusOutcome {
            updated: store.set_status(&ids, status).await?,
            skipped: 0,
        }
    };

    tracing::info!(updated = outcome.updated, status = ?status, "Bulk status change applied");
    audit(
        store,
        actor,
        "accreditation.bulk_status",
        serde_json::json!({
            "ids": ids,
            "status": status,
            "updated": outcome.updated,
            "skipped": outcome.skipped,
        }),
    )
    .await;
    Ok(outcome)
}

pub async fn bulk_delete(store: &dyn Datastore, actor: &str, ids: &[i64]) -> ServiceResult<u64> {
    let ids = require_selection(ids)?;
    let deleted = store.delete_accreditations(&ids).await?;
    tracing::info!(deleted, "Bulk delete applied");
    audit(
        store,
        actor,
        "accreditation.bulk_delete",
        serde_json::json!({ "ids": ids, "deleted": deleted }),
    )
    .await;
    Ok(deleted)
}

/// Send the approval email for one record. Refused unless it is approved
/// and zoned.
pub async fn notify(
    store: &dyn Datastore,
    mailer: &dyn Mailer,
    actor: &str,
    id: i64,
) -> ServiceResult<()> {
    let row = store.get_accreditation(id).await?.ok_or_else(|| not_found(id))?;
    let notice = ApprovalNotice::for_accreditation(&row).ok_or_else(|| {
        AppError::new(ErrorCode::NotEligibleForNotification)
            .with_detail("id", id)
            .with_detail("status", row.status.label())
    })?;

    mailer.send_approval(&notice).await.map_err(|e| {
        tracing::error!(id, error = %e, "Approval email failed");
        AppError::upstream(ErrorCode::EmailDeliveryFailed, e)
    })?;

    audit(store, actor, "notification.single", serde_json::json!({ "id": id })).await;
    Ok(())
}

/// Send approval emails to the eligible subset of the selection.
pub async fn notify_batch(
    store: &dyn Datastore,
    mailer: &dyn Mailer,
    actor: &str,
    ids: &[i64],
) -> ServiceResult<NotificationOutcome> {
    let ids = require_selection(ids)?;
    let rows = store.find_accreditations(&ids).await?;
    let notices: Vec<ApprovalNotice> = rows.iter().filter_map(ApprovalNotice::for_accreditation).collect();
    let omitted = ids.len() - notices.len();

    if notices.is_empty() {
        return Err(AppError::new(ErrorCode::NoEligibleRecords)
            .with_detail("omitted", omitted)
            .into());
    }

    let delivery = mailer.send_approval_batch(&notices).await.map_err(|e| {
        tracing::error!(recipients = notices.len(), error = %e, "Approval batch failed");
        AppError::upstream(ErrorCode::EmailDeliveryFailed, e)
    })?;
    let outcome = NotificationOutcome {
        sent: delivery.sent,
        omitted,
        failed: delivery.failed,
    };

    audit(
        store,
        actor,
        "notification.batch",
        serde_json::json!({
            "ids": ids,
            "sent": outcome.sent,
            "omitted": outcome.omitted,
            "failed": outcome.failed,
        }),
    )
    .await;
    Ok(outcome)
}
