//! Route configuration for coaching endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    export_feedback, get_statistics, health, list_recent_feedback, request_intervention,
    submit_feedback, CoachingAppState,
};

/// Creates the coaching router with all endpoints.
///
/// Routes:
/// - `GET /health` - Liveness plus catalog size and provider
/// - `POST /api/interventions` - Classify, select and generate
/// - `POST /api/feedback` - Record feedback (201)
/// - `GET /api/feedback/statistics` - Aggregate statistics
/// - `GET /api/feedback/recent?limit=N` - Newest entries first
/// - `GET /api/feedback/export` - CSV download
pub fn coaching_router() -> Router<CoachingAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/interventions", post(request_intervention))
        .route("/api/feedback", post(submit_feedback))
        .route("/api/feedback/statistics", get(get_statistics))
        .route("/api/feedback/recent", get(list_recent_feedback))
        .route("/api/feedback/export", get(export_feedback))
}
