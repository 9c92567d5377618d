//! Admin session JWT authentication for the dashboard and attendance API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// Session claims issued by the identity provider
#[derive(Debug, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin user ID
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    pub aud: String,
}

/// Authenticated admin identity extracted from the session token
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user_id: String,
    pub email: Option<String>,
}

impl AdminSession {
    /// Actor string written to the audit log
    pub fn actor(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

/// Middleware that verifies the `Authorization: Bearer` session token
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format").into_response())?;

    let session = verify_token(token, &state.jwt_secret, &state.jwt_audience)
        .map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

fn verify_token(token: &str, secret: &str, audience: &str) -> Result<AdminSession, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);

    let token_data = jsonwebtoken::decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::invalid_token("Invalid or expired token")
    })?;

    Ok(AdminSession {
        user_id: token_data.claims.sub,
        email: token_data.claims.email,
    })
}

/// Sign a session token (tests stand in for the identity provider)
#[cfg(test)]
pub fn create_token(
    user_id: &str,
    email: &str,
    secret: &str,
    audience: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    use jsonwebtoken::{EncodingKey, Header};

    let claims = AdminClaims {
        sub: user_id.to_string(),
        email: Some(email.to_string()),
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
        aud: audience.to_string(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
