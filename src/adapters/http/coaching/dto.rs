//! Data transfer objects for the coaching HTTP API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::handlers::GetFeedbackStatisticsResult;
use crate::domain::coaching::BarrierCategory;
use crate::domain::feedback::{
    FeedbackRecord, FeedbackStatistics, Rating, TechniquePerformance, TrialIntent,
};
use crate::domain::foundation::ValidationError;

/// Number of techniques listed in the statistics response.
pub const TOP_TECHNIQUES_LIMIT: usize = 5;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Request body for `POST /api/interventions`.
#[derive(Debug, Clone, Deserialize)]
pub struct InterventionRequestDto {
    pub goal: String,
    pub barrier: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Request body for `POST /api/feedback`.
///
/// Enumerated fields arrive as plain values and are checked by the handler,
/// so bad values produce a validation error rather than a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequestDto {
    pub user_goal: String,
    pub user_barrier: String,
    pub target_component: String,
    pub technique_used: String,
    #[serde(default)]
    pub theory: String,
    pub rating: i64,
    pub would_try: String,
    #[serde(default)]
    pub feedback_text: Option<String>,
}

impl FeedbackRequestDto {
    /// Parses the enumerated fields into a domain record.
    pub fn into_record(self) -> Result<FeedbackRecord, ValidationError> {
        let rating = u8::try_from(self.rating)
            .ok()
            .map(Rating::try_new)
            .unwrap_or_else(|| {
                Err(ValidationError::out_of_range(
                    "rating",
                    Rating::MIN as i32,
                    Rating::MAX as i32,
                    self.rating.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
                ))
            })?;

        Ok(FeedbackRecord {
            user_goal: self.user_goal,
            user_barrier: self.user_barrier,
            target_component: self.target_component.parse::<BarrierCategory>()?,
            technique_used: self.technique_used,
            theory: self.theory,
            rating,
            would_try: self.would_try.parse::<TrialIntent>()?,
            feedback_text: self.feedback_text,
        })
    }
}

/// Response body for `GET /api/feedback/statistics`.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<FeedbackStatistics>,
    pub top_techniques: Vec<TechniquePerformance>,
    /// Percent of responses per category.
    pub component_share: BTreeMap<BarrierCategory, f64>,
    /// Malformed log rows left out of the numbers.
    pub skipped_rows: usize,
}

impl From<GetFeedbackStatisticsResult> for StatisticsResponse {
    fn from(result: GetFeedbackStatisticsResult) -> Self {
        let GetFeedbackStatisticsResult {
            statistics,
            skipped_rows,
        } = result;
        let top_techniques = statistics
            .as_ref()
            .map(|s| s.top_techniques(TOP_TECHNIQUES_LIMIT))
            .unwrap_or_default();
        let component_share = statistics
            .as_ref()
            .map(|s| {
                BarrierCategory::ALL
                    .iter()
                    .map(|category| (*category, s.component_share(*category)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            has_data: statistics.is_some(),
            statistics,
            top_techniques,
            component_share,
            skipped_rows,
        }
    }
}

/// Query parameters for `GET /api/feedback/recent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub techniques: usize,
    pub provider: String,
    pub model: String,
}
