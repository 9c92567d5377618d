//! HTTP routes for the accreditation service

pub mod admin;
pub mod attendance;
pub mod bulk_import;
pub mod health;
pub mod submit;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router, middleware};
use http::{HeaderValue, Method, header};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth_middleware;
use crate::import::MAX_UPLOAD_BYTES;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Room for multipart boundaries and part headers around the file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes with state, no tower-http layers
pub fn create_router(state: AppState) -> Router {
    // Public intake (no auth)
    let public = Router::new()
        .route("/api/accreditations", post(submit::submit_accreditation))
        .route(
            "/api/bulk-accreditations",
            post(bulk_import::upload)
                .get(bulk_import::download_template)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD)),
        );

    // Staff (bearer session)
    let staff = Router::new()
        .route("/api/admin/accreditations", get(admin::list_accreditations))
        .route(
            "/api/admin/accreditations/export",
            get(admin::export_accreditations),
        )
        .route(
            "/api/admin/accreditations/bulk-status",
            post(admin::bulk_update_status),
        )
        .route(
            "/api/admin/accreditations/bulk-delete",
            post(admin::bulk_delete),
        )
        .route(
            "/api/admin/accreditations/{id}",
            delete(admin::delete_accreditation),
        )
        .route(
            "/api/admin/accreditations/{id}/status",
            patch(admin::update_status),
        )
        .route(
            "/api/admin/accreditations/{id}/zone",
            patch(admin::update_zone),
        )
        .route(
            "/api/admin/accreditations/{id}/notify",
            post(admin::notify),
        )
        .route("/api/admin/notifications", post(admin::notify_batch))
        .route(
            "/api/attendance",
            get(attendance::get_attendance).post(attendance::record_attendance),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(staff)
        .with_state(state)
}

/// Full application: routes plus request tracing and optional CORS
pub fn build_app(state: AppState, cors_allow_origin: Option<&str>) -> Router {
    let mut app = create_router(state);

    if let Some(origin) = cors_allow_origin {
        match HeaderValue::from_str(origin) {
            Ok(origin) => {
                app = app.layer(
                    CorsLayer::new()
                        .allow_origin(origin)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PATCH,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                        .expose_headers([header::CONTENT_DISPOSITION]),
                );
            }
            Err(e) => tracing::warn!("Ignoring invalid CORS_ALLOW_ORIGIN {origin:?}: {e}"),
        }
    }

    app.layer(TraceLayer::new_for_http())
}
