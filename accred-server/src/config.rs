//! Server configuration

use chrono::{FixedOffset, Offset, Utc};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Shared secret of the identity provider that signs admin session tokens
    pub auth_jwt_secret: String,
    /// Expected `aud` claim of admin session tokens
    pub auth_jwt_audience: String,
    /// SES sender email address
    pub ses_from_email: String,
    /// SES stored template used for approval emails
    pub ses_approval_template: String,
    /// Number of event days attendance can be recorded for
    pub event_days: i32,
    /// UTC offset (hours) used when formatting dates in exports
    pub event_utc_offset_hours: i32,
    /// Allowed CORS origin for the dashboard (none = same origin only)
    pub cors_allow_origin: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let event_days: i32 = std::env::var("EVENT_DAYS")
            .ok()
            .and_then(|d| d.parse().ok())
            .unwrap_or(8);
        if event_days < 1 {
            return Err(format!("EVENT_DAYS must be at least 1, got {event_days}").into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: environment.clone(),
            auth_jwt_secret: Self::require_secret("AUTH_JWT_SECRET", &environment)?,
            auth_jwt_audience: std::env::var("AUTH_JWT_AUDIENCE")
                .unwrap_or_else(|_| "authenticated".into()),
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "acreditaciones@example.org".into()),
            ses_approval_template: std::env::var("SES_APPROVAL_TEMPLATE")
                .unwrap_or_else(|_| "accreditation-approved".into()),
            event_days,
            event_utc_offset_hours: std::env::var("EVENT_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i32| (-12..=14).contains(h))
                .unwrap_or(-3),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }

    /// Event-local offset for rendered dates
    pub fn export_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.event_utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    /// Development defaults without touching the environment
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/accreditations_test".into(),
            http_port: 0,
            environment: "development".into(),
            auth_jwt_secret: "test-secret".into(),
            auth_jwt_audience: "authenticated".into(),
            ses_from_email: "acreditaciones@example.org".into(),
            ses_approval_template: "accreditation-approved".into(),
            event_days: 8,
            event_utc_offset_hours: -3,
            cors_allow_origin: None,
        }
    }
}
