//! ListRecentFeedbackHandler - Query handler for the latest entries.

use std::sync::Arc;

use crate::domain::coaching::CoachingError;
use crate::domain::feedback::FeedbackEntry;
use crate::ports::FeedbackLog;

/// Number of entries returned when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Query for the most recent feedback entries.
#[derive(Debug, Clone)]
pub struct ListRecentFeedbackQuery {
    pub limit: usize,
}

impl Default for ListRecentFeedbackQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Handler returning up to `limit` entries, newest first.
pub struct ListRecentFeedbackHandler {
    log: Arc<dyn FeedbackLog>,
}

impl ListRecentFeedbackHandler {
    pub fn new(log: Arc<dyn FeedbackLog>) -> Self {
        Self { log }
    }

    pub async fn handle(
        &self,
        query: ListRecentFeedbackQuery,
    ) -> Result<Vec<FeedbackEntry>, CoachingError> {
        let snapshot = self
            .log
            .read_all()
            .await
            .map_err(|e| CoachingError::LogReadFailed(e.to_string()))?;

        Ok(snapshot
            .entries
            .into_iter()
            .rev()
            .take(query.limit)
            .collect())
    }
}
