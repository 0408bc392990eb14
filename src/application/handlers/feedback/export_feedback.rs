//! ExportFeedbackHandler - Query handler for downloading the raw log.

use std::sync::Arc;

use crate::domain::coaching::CoachingError;
use crate::domain::foundation::Timestamp;
use crate::ports::FeedbackLog;

/// Query for the full CSV log.
#[derive(Debug, Clone, Default)]
pub struct ExportFeedbackQuery;

/// CSV bytes and a dated file name for the download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackExport {
    pub filename: String,
    pub content: Vec<u8>,
}

pub struct ExportFeedbackHandler {
    log: Arc<dyn FeedbackLog>,
}

impl ExportFeedbackHandler {
    pub fn new(log: Arc<dyn FeedbackLog>) -> Self {
        Self { log }
    }

    pub async fn handle(&self, _query: ExportFeedbackQuery) -> Result<FeedbackExport, CoachingError> {
        let content = self
            .log
            .export()
            .await
            .map_err(|e| CoachingError::LogReadFailed(e.to_string()))?;

        Ok(FeedbackExport {
            filename: format!("feedback_{}.csv", Timestamp::now().date_stamp()),
            content,
        })
    }
}
