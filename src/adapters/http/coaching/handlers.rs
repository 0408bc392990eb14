//! HTTP handlers for coaching and feedback endpoints.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::{
    ExportFeedbackHandler, ExportFeedbackQuery, GenerationSettings, GetFeedbackStatisticsHandler,
    GetFeedbackStatisticsQuery, ListRecentFeedbackHandler, ListRecentFeedbackQuery,
    RequestInterventionCommand, RequestInterventionHandler, SubmitFeedbackCommand,
    SubmitFeedbackHandler,
};
use crate::domain::coaching::{CoachingError, InterventionOutcome, TechniqueCatalog};
use crate::domain::feedback::FeedbackEntry;
use crate::domain::foundation::ValidationError;
use crate::ports::{AIProvider, FeedbackLog};

use super::dto::{
    ErrorResponse, FeedbackRequestDto, HealthResponse, InterventionRequestDto, RecentParams,
    StatisticsResponse,
};

/// Largest `limit` accepted by the recent-feedback endpoint.
const MAX_RECENT_LIMIT: usize = 100;

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// API error that implements IntoResponse.
#[derive(Debug)]
pub struct ApiError(CoachingError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CoachingError::Validation(_) => StatusCode::BAD_REQUEST,
            CoachingError::EmptyCatalog => StatusCode::SERVICE_UNAVAILABLE,
            CoachingError::GenerationUnavailable(_) => StatusCode::BAD_GATEWAY,
            CoachingError::LogWriteFailed(_) | CoachingError::LogReadFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.0.code(), self.0.to_string());
        if let CoachingError::Validation(ref err) = self.0 {
            body = body.with_details(serde_json::json!({ "field": err.field() }));
        }
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), error = %self.0, "Request failed");
        }
        (status, Json(body)).into_response()
    }
}

impl From<CoachingError> for ApiError {
    fn from(error: CoachingError) -> Self {
        ApiError(error)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError(CoachingError::Validation(error))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state, built once at startup.
#[derive(Clone)]
pub struct CoachingAppState {
    pub catalog: Arc<TechniqueCatalog>,
    pub ai_provider: Arc<dyn AIProvider>,
    pub feedback_log: Arc<dyn FeedbackLog>,
    pub generation: GenerationSettings,
    pub recent_limit: usize,
}

impl CoachingAppState {
    pub fn new(
        catalog: Arc<TechniqueCatalog>,
        ai_provider: Arc<dyn AIProvider>,
        feedback_log: Arc<dyn FeedbackLog>,
    ) -> Self {
        Self {
            catalog,
            ai_provider,
            feedback_log,
            generation: GenerationSettings::default(),
            recent_limit: crate::application::handlers::DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_generation(mut self, generation: GenerationSettings) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }

    pub fn request_intervention_handler(&self) -> RequestInterventionHandler {
        RequestInterventionHandler::new(
            self.catalog.clone(),
            self.ai_provider.clone(),
            self.generation,
        )
    }

    pub fn submit_feedback_handler(&self) -> SubmitFeedbackHandler {
        SubmitFeedbackHandler::new(self.feedback_log.clone())
    }

    pub fn statistics_handler(&self) -> GetFeedbackStatisticsHandler {
        GetFeedbackStatisticsHandler::new(self.feedback_log.clone())
    }

    pub fn recent_feedback_handler(&self) -> ListRecentFeedbackHandler {
        ListRecentFeedbackHandler::new(self.feedback_log.clone())
    }

    pub fn export_feedback_handler(&self) -> ExportFeedbackHandler {
        ExportFeedbackHandler::new(self.feedback_log.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health(State(state): State<CoachingAppState>) -> Json<HealthResponse> {
    let info = state.ai_provider.provider_info();
    Json(HealthResponse {
        status: "ok",
        techniques: state.catalog.len(),
        provider: info.name,
        model: info.model,
    })
}

/// POST /api/interventions
///
/// Classifies the barrier, selects a technique and returns a personalized message.
pub async fn request_intervention(
    State(state): State<CoachingAppState>,
    Json(request): Json<InterventionRequestDto>,
) -> Result<Json<InterventionOutcome>, ApiError> {
    let outcome = state
        .request_intervention_handler()
        .handle(RequestInterventionCommand {
            goal: request.goal,
            barrier: request.barrier,
            context: request.context,
        })
        .await?;

    Ok(Json(outcome))
}

/// POST /api/feedback
///
/// Appends one feedback entry and returns it with its server timestamp.
pub async fn submit_feedback(
    State(state): State<CoachingAppState>,
    Json(request): Json<FeedbackRequestDto>,
) -> Result<(StatusCode, Json<FeedbackEntry>), ApiError> {
    let record = request.into_record()?;
    let entry = state
        .submit_feedback_handler()
        .handle(SubmitFeedbackCommand { record })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/feedback/statistics
pub async fn get_statistics(
    State(state): State<CoachingAppState>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let statistics = state
        .statistics_handler()
        .handle(GetFeedbackStatisticsQuery)
        .await?;

    Ok(Json(StatisticsResponse::from(statistics)))
}

/// GET /api/feedback/recent?limit=N
///
/// Returns the newest entries first.
pub async fn list_recent_feedback(
    State(state): State<CoachingAppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<FeedbackEntry>>, ApiError> {
    let limit = params.limit.unwrap_or(state.recent_limit);
    if limit == 0 || limit > MAX_RECENT_LIMIT {
        return Err(ValidationError::out_of_range(
            "limit",
            1,
            MAX_RECENT_LIMIT as i32,
            limit.min(i32::MAX as usize) as i32,
        )
        .into());
    }

    let entries = state
        .recent_feedback_handler()
        .handle(ListRecentFeedbackQuery { limit })
        .await?;

    Ok(Json(entries))
}

/// GET /api/feedback/export
///
/// Downloads the raw CSV log.
pub async fn export_feedback(State(state): State<CoachingAppState>) -> Result<Response, ApiError> {
    let export = state
        .export_feedback_handler()
        .handle(ExportFeedbackQuery)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.content).into_response())
}
