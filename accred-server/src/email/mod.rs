//! Approval email delivery
//!
//! Message bodies live in an SES stored template; this module only fills
//! the template data.

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{
    BulkEmailContent, BulkEmailEntry, BulkEmailStatus, Destination, EmailContent,
    ReplacementEmailContent, ReplacementTemplate, Template,
};
use serde::Serialize;
use shared::models::{Accreditation, Area, Zone};

use crate::error::BoxError;

/// SendBulkEmail destination limit
const BULK_CHUNK_SIZE: usize = 50;

/// One approval email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalNotice {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub zone: Zone,
    pub area: Area,
}

impl ApprovalNotice {
    /// `None` unless the record is approved and has a zone
    pub fn for_accreditation(row: &Accreditation) -> Option<Self> {
        if !row.is_notifiable() {
            return None;
        }
        Some(Self {
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            email: row.email.clone(),
            zone: row.zone?,
            area: row.area,
        })
    }

    fn template_data(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Data<'a> {
            first_name: &'a str,
            last_name: &'a str,
            zone: &'static str,
            area: &'static str,
        }
        serde_json::to_string(&Data {
            first_name: &self.first_name,
            last_name: &self.last_name,
            zone: self.zone.label(),
            area: self.area.label(),
        })
    }
}

/// Outcome of an accepted batch send; `failed` counts entries the provider
/// rejected individually
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchDelivery {
    pub sent: usize,
    pub failed: usize,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_approval(&self, notice: &ApprovalNotice) -> Result<(), BoxError>;

    /// A failed provider call aborts the batch and is returned as-is
    async fn send_approval_batch(
        &self,
        notices: &[ApprovalNotice],
    ) -> Result<BatchDelivery, BoxError>;
}

/// Per-recipient bulk entry carrying that recipient's template data
fn bulk_entry(notice: &ApprovalNotice) -> Result<BulkEmailEntry, serde_json::Error> {
    let replacement = ReplacementEmailContent::builder()
        .replacement_template(
            ReplacementTemplate::builder()
                .replacement_template_data(notice.template_data()?)
                .build(),
        )
        .build();
    Ok(BulkEmailEntry::builder()
        .destination(Destination::builder().to_addresses(&notice.email).build())
        .replacement_email_content(replacement)
        .build())
}

/// AWS SES v2 mailer using a stored template
pub struct SesMailer {
    ses: SesClient,
    from: String,
    template: String,
}

impl SesMailer {
    pub fn new(ses: SesClient, from: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            ses,
            from: from.into(),
            template: template.into(),
        }
    }

    async fn send_chunk(&self, chunk: &[ApprovalNotice]) -> Result<usize, BoxError> {
        let entries = chunk
            .iter()
            .map(bulk_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let default_content = BulkEmailContent::builder()
            .template(
                Template::builder()
                    .template_name(&self.template)
                    .template_data("{}")
                    .build(),
            )
            .build();

        let output = self
            .ses
            .send_bulk_email()
            .from_email_address(&self.from)
            .default_content(default_content)
            .set_bulk_email_entries(Some(entries))
            .send()
            .await?;

        let sent = output
            .bulk_email_entry_results()
            .iter()
            .filter(|r| r.status() == Some(&BulkEmailStatus::Success))
            .count();
        Ok(sent)
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send_approval(&self, notice: &ApprovalNotice) -> Result<(), BoxError> {
        let template = Template::builder()
            .template_name(&self.template)
            .template_data(notice.template_data()?)
            .build();

        self.ses
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(&notice.email).build())
            .content(EmailContent::builder().template(template).build())
            .send()
            .await?;

        tracing::info!(to = %notice.email, zone = %notice.zone, "Approval email sent");
        Ok(())
    }

    async fn send_approval_batch(
        &self,
        notices: &[ApprovalNotice],
    ) -> Result<BatchDelivery, BoxError> {
        let mut delivery = BatchDelivery::default();
        for chunk in notices.chunks(BULK_CHUNK_SIZE) {
            let sent = self.send_chunk(chunk).await.inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    recipients = chunk.len(),
                    already_sent = delivery.sent,
                    "Bulk approval email failed"
                );
            })?;
            delivery.sent += sent;
            delivery.failed += chunk.len() - sent;
        }
        tracing::info!(sent = delivery.sent, failed = delivery.failed, "Approval batch delivered");
        Ok(delivery)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::AccreditationStatus;

    fn row(status: AccreditationStatus, zone: Option<Zone>) -> Accreditation {
        Accreditation {
            id: 7,
            first_name: "Maria".into(),
            last_name: "Gonzalez".into(),
            document: "98765432-9".into(),
            email: "maria@example.com".into(),
            company: Some("Empresa B".into()),
            area: Area::Volunteers,
            status,
            zone,
            created_at: 0,
        }
    }

    #[test]
    fn test_notice_only_for_approved_and_zoned() {
        assert!(ApprovalNotice::for_accreditation(&row(AccreditationStatus::Pending, Some(Zone::Vip))).is_none());
        assert!(ApprovalNotice::for_accreditation(&row(AccreditationStatus::Approved, None)).is_none());

        let notice =
            ApprovalNotice::for_accreditation(&row(AccreditationStatus::Approved, Some(Zone::Vip)))
                .unwrap();
        assert_eq!(notice.email, "maria@example.com");
        assert_eq!(notice.zone, Zone::Vip);
    }

    #[test]
    fn test_bulk_entry_targets_recipient_with_own_data() {
        let notice =
            ApprovalNotice::for_accreditation(&row(AccreditationStatus::Approved, Some(Zone::Vip)))
                .unwrap();
        let entry = bulk_entry(&notice).unwrap();

        let to = entry.destination().map(|d| d.to_addresses()).unwrap_or_default();
        assert_eq!(to, ["maria@example.com".to_string()]);

        let data = entry
            .replacement_email_content()
            .and_then(|c| c.replacement_template())
            .and_then(|t| t.replacement_template_data())
            .unwrap();
        let data: serde_json::Value = serde_json::from_str(data).unwrap();
        assert_eq!(data["last_name"], "Gonzalez");
    }

    #[test]
    fn test_template_data_uses_display_labels() {
        let notice =
            ApprovalNotice::for_accreditation(&row(AccreditationStatus::Approved, Some(Zone::AllZones)))
                .unwrap();
        let data: serde_json::Value = serde_json::from_str(&notice.template_data().unwrap()).unwrap();
        assert_eq!(data["first_name"], "Maria");
        assert_eq!(data["zone"], "Todas las zonas");
        assert_eq!(data["area"], "Voluntarios");
    }
}
