//! Feedback handlers - recording, statistics, history and export.

mod export_feedback;
mod get_feedback_statistics;
mod list_recent_feedback;
mod submit_feedback;

pub use export_feedback::{ExportFeedbackHandler, ExportFeedbackQuery, FeedbackExport};
pub use get_feedback_statistics::{
    GetFeedbackStatisticsHandler, GetFeedbackStatisticsQuery, GetFeedbackStatisticsResult,
};
pub use list_recent_feedback::{
    ListRecentFeedbackHandler, ListRecentFeedbackQuery, DEFAULT_RECENT_LIMIT,
};
pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackHandler};
