//! Application state

use std::sync::Arc;

use aws_sdk_sesv2::Client as SesClient;
use chrono::FixedOffset;
use sqlx::PgPool;

use crate::config::Config;
use crate::db::{Datastore, PgDatastore};
use crate::email::{Mailer, SesMailer};
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Accreditation, attendance and audit storage
    pub store: Arc<dyn Datastore>,
    /// Approval email delivery
    pub mailer: Arc<dyn Mailer>,
    /// Shared secret of the identity provider (admin session tokens)
    pub jwt_secret: String,
    /// Expected `aud` claim of admin session tokens
    pub jwt_audience: String,
    /// Number of event days (attendance days are `1..=event_days`)
    pub event_days: i32,
    /// Offset used to render dates in exports
    pub export_offset: FixedOffset,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let ses = if let Ok(ses_region) = std::env::var("SES_REGION") {
            let ses_config = aws_config
                .to_builder()
                .region(aws_config::Region::new(ses_region))
                .build();
            SesClient::new(&ses_config)
        } else {
            SesClient::new(&aws_config)
        };

        let mailer = SesMailer::new(
            ses,
            config.ses_from_email.clone(),
            config.ses_approval_template.clone(),
        );

        Ok(Self::with_parts(
            Arc::new(PgDatastore::new(pool)),
            Arc::new(mailer),
            config,
        ))
    }

    /// Assemble state from already-built collaborators
    pub fn with_parts(store: Arc<dyn Datastore>, mailer: Arc<dyn Mailer>, config: &Config) -> Self {
        Self {
            store,
            mailer,
            jwt_secret: config.auth_jwt_secret.clone(),
            jwt_audience: config.auth_jwt_audience.clone(),
            event_days: config.event_days,
            export_offset: config.export_offset(),
        }
    }
}
