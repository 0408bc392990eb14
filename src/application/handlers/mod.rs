//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod coaching;
pub mod feedback;

pub use coaching::{
    ClassifyBarrierCommand, ClassifyBarrierHandler, GenerateInterventionCommand,
    GenerateInterventionHandler, GenerationSettings, RequestInterventionCommand,
    RequestInterventionHandler, RequestInterventionResult,
};
pub use feedback::{
    ExportFeedbackHandler, ExportFeedbackQuery, FeedbackExport, GetFeedbackStatisticsHandler,
    GetFeedbackStatisticsQuery, GetFeedbackStatisticsResult, ListRecentFeedbackHandler,
    ListRecentFeedbackQuery, SubmitFeedbackCommand, SubmitFeedbackHandler, DEFAULT_RECENT_LIMIT,
};
