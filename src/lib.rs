//! Intake — gated resume submission service.
//!
//! Applicants register, upload a PDF resume, and the service validates the
//! document, runs it through an extraction collaborator, and persists the
//! structured answers for redisplay.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the service router. Shared with the integration tests, which drive
/// it directly through `tower::ServiceExt`.
pub fn router(state: AppState) -> Router {
    // Leave headroom above the raw file ceiling for multipart framing.
    let body_limit = state.policy.max_file_size as usize + 64 * 1024;

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/v1/accounts", post(handlers::create_account))
        .route("/api/v1/login", post(handlers::login))
        .route("/api/v1/submissions", post(handlers::submit_resume))
        .route("/api/v1/submissions/:email", get(handlers::show_answers))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
