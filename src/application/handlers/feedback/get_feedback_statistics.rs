//! GetFeedbackStatisticsHandler - Query handler for aggregate feedback.

use std::sync::Arc;

use crate::domain::coaching::CoachingError;
use crate::domain::feedback::FeedbackStatistics;
use crate::ports::FeedbackLog;

/// Query for aggregate statistics over the whole log.
#[derive(Debug, Clone, Default)]
pub struct GetFeedbackStatisticsQuery;

/// Aggregates plus the number of log rows that could not be read.
///
/// `statistics` is `None` when the log holds no valid entries. `skipped_rows`
/// is reported either way, so a log made only of malformed rows is not
/// mistaken for an empty one.
#[derive(Debug, Clone, PartialEq)]
pub struct GetFeedbackStatisticsResult {
    pub statistics: Option<FeedbackStatistics>,
    pub skipped_rows: usize,
}

impl GetFeedbackStatisticsResult {
    pub fn has_data(&self) -> bool {
        self.statistics.is_some()
    }
}

/// Handler for feedback statistics.
///
/// Reads the full log on every call; nothing is cached.
pub struct GetFeedbackStatisticsHandler {
    log: Arc<dyn FeedbackLog>,
}

impl GetFeedbackStatisticsHandler {
    pub fn new(log: Arc<dyn FeedbackLog>) -> Self {
        Self { log }
    }

    pub async fn handle(
        &self,
        _query: GetFeedbackStatisticsQuery,
    ) -> Result<GetFeedbackStatisticsResult, CoachingError> {
        let snapshot = self
            .log
            .read_all()
            .await
            .map_err(|e| CoachingError::LogReadFailed(e.to_string()))?;

        if snapshot.skipped_rows > 0 {
            tracing::warn!(
                skipped_rows = snapshot.skipped_rows,
                "Feedback statistics ignore malformed rows"
            );
        }

        Ok(GetFeedbackStatisticsResult {
            statistics: FeedbackStatistics::compute(&snapshot.entries, snapshot.skipped_rows),
            skipped_rows: snapshot.skipped_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::feedback::{CsvFeedbackLog, InMemoryFeedbackLog};
    use crate::domain::coaching::BarrierCategory;
    use crate::domain::feedback::{FeedbackEntry, FeedbackRecord, Rating, TrialIntent};

    fn entry(technique: &str, rating: u8, would_try: TrialIntent) -> FeedbackEntry {
        FeedbackEntry::now(FeedbackRecord {
            user_goal: "exercise more".to_string(),
            user_barrier: "I'm too tired".to_string(),
            target_component: BarrierCategory::Motivation,
            technique_used: technique.to_string(),
            theory: "Behavioral Economics".to_string(),
            rating: Rating::try_new(rating).unwrap(),
            would_try,
            feedback_text: None,
        })
    }

    #[tokio::test]
    async fn empty_log_has_no_statistics() {
        let handler = GetFeedbackStatisticsHandler::new(Arc::new(InMemoryFeedbackLog::new()));
        let result = handler.handle(GetFeedbackStatisticsQuery).await.unwrap();
        assert!(!result.has_data());
        assert_eq!(result.skipped_rows, 0);
    }

    #[tokio::test]
    async fn aggregates_logged_entries() {
        let log = InMemoryFeedbackLog::with_entries(vec![
            entry("A", 4, TrialIntent::Yes),
            entry("A", 2, TrialIntent::No),
        ]);
        let handler = GetFeedbackStatisticsHandler::new(Arc::new(log));

        let stats = handler
            .handle(GetFeedbackStatisticsQuery)
            .await
            .unwrap()
            .statistics
            .unwrap();

        assert_eq!(stats.total_responses, 2);
        assert_eq!(stats.average_rating, 3.0);
        assert_eq!(stats.would_try_percent, 50.0);
    }

    #[tokio::test]
    async fn repeated_queries_agree() {
        let log = InMemoryFeedbackLog::with_entries(vec![
            entry("A", 5, TrialIntent::Maybe),
            entry("B", 3, TrialIntent::No),
        ]);
        let handler = GetFeedbackStatisticsHandler::new(Arc::new(log));

        let first = handler.handle(GetFeedbackStatisticsQuery).await.unwrap();
        let second = handler.handle(GetFeedbackStatisticsQuery).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn log_of_only_malformed_rows_reports_skipped_count() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("feedback.csv");
        std::fs::write(
            &path,
            "timestamp,user_goal,user_barrier,target_component,technique_used,theory,rating,would_try,feedback_text\n\
             2024-03-01 09:30:00,g,b,motivation,A,T,nine,Yes,\n\
             2024-03-01 09:31:00,g,b,willpower,A,T,3,Yes,\n",
        )
        .unwrap();
        let handler = GetFeedbackStatisticsHandler::new(Arc::new(CsvFeedbackLog::new(&path)));

        let result = handler.handle(GetFeedbackStatisticsQuery).await.unwrap();

        assert!(!result.has_data());
        assert_eq!(result.skipped_rows, 2);
    }

    #[tokio::test]
    async fn read_failure_is_distinct_from_no_data() {
        let log = InMemoryFeedbackLog::new();
        log.set_unavailable(true);
        let handler = GetFeedbackStatisticsHandler::new(Arc::new(log));

        let result = handler.handle(GetFeedbackStatisticsQuery).await;
        assert!(matches!(result, Err(CoachingError::LogReadFailed(_))));
    }
}
