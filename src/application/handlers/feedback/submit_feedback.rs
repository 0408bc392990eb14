//! SubmitFeedbackHandler - Command handler for recording user feedback.

use std::sync::Arc;

use crate::domain::coaching::CoachingError;
use crate::domain::feedback::{FeedbackEntry, FeedbackRecord};
use crate::ports::FeedbackLog;

/// Command to record feedback on an intervention.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub record: FeedbackRecord,
}

/// Handler for recording feedback.
///
/// Stamps the record with the server time and appends it to the log.
pub struct SubmitFeedbackHandler {
    log: Arc<dyn FeedbackLog>,
}

impl SubmitFeedbackHandler {
    pub fn new(log: Arc<dyn FeedbackLog>) -> Self {
        Self { log }
    }

    pub async fn handle(&self, cmd: SubmitFeedbackCommand) -> Result<FeedbackEntry, CoachingError> {
        let record = cmd.record.validated()?;
        let entry = FeedbackEntry::now(record);

        self.log.append(&entry).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to append feedback entry");
            CoachingError::LogWriteFailed(e.to_string())
        })?;

        tracing::info!(
            technique = %entry.record.technique_used,
            rating = entry.record.rating.value(),
            would_try = %entry.record.would_try,
            "Recorded feedback"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::feedback::InMemoryFeedbackLog;
    use crate::domain::coaching::BarrierCategory;
    use crate::domain::feedback::{Rating, TrialIntent};

    fn record() -> FeedbackRecord {
        FeedbackRecord {
            user_goal: "  exercise more ".to_string(),
            user_barrier: "I'm too tired".to_string(),
            target_component: BarrierCategory::Motivation,
            technique_used: "Temptation Bundling".to_string(),
            theory: "Behavioral Economics".to_string(),
            rating: Rating::try_new(4).unwrap(),
            would_try: TrialIntent::Yes,
            feedback_text: Some("   ".to_string()),
        }
    }

    #[tokio::test]
    async fn appends_normalized_entry() {
        let log = InMemoryFeedbackLog::new();
        let handler = SubmitFeedbackHandler::new(Arc::new(log.clone()));

        let entry = handler
            .handle(SubmitFeedbackCommand { record: record() })
            .await
            .unwrap();

        assert_eq!(entry.record.user_goal, "exercise more");
        assert_eq!(entry.record.feedback_text, None);
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn rejects_missing_technique() {
        let log = InMemoryFeedbackLog::new();
        let handler = SubmitFeedbackHandler::new(Arc::new(log.clone()));
        let mut record = record();
        record.technique_used = String::new();

        let result = handler.handle(SubmitFeedbackCommand { record }).await;

        assert!(matches!(result, Err(CoachingError::Validation(_))));
        assert!(log.is_empty().await);
    }

    #[tokio::test]
    async fn write_failure_is_log_write_failed() {
        let log = InMemoryFeedbackLog::new();
        log.set_unavailable(true);
        let handler = SubmitFeedbackHandler::new(Arc::new(log));

        let result = handler.handle(SubmitFeedbackCommand { record: record() }).await;

        assert!(matches!(result, Err(CoachingError::LogWriteFailed(_))));
    }
}
