//! Feedback Log Port - Append-only storage for feedback entries.

use async_trait::async_trait;

use crate::domain::feedback::FeedbackEntry;

/// Errors raised by feedback log implementations.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackLogError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for FeedbackLogError {
    fn from(err: std::io::Error) -> Self {
        FeedbackLogError::Io(err.to_string())
    }
}

impl From<csv::Error> for FeedbackLogError {
    fn from(err: csv::Error) -> Self {
        FeedbackLogError::Csv(err.to_string())
    }
}

/// Every well-formed entry in the log, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSnapshot {
    pub entries: Vec<FeedbackEntry>,
    /// Rows that could not be parsed and were skipped.
    pub skipped_rows: usize,
}

impl FeedbackSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Port for the append-only feedback log.
///
/// Existing entries are never modified or removed.
#[async_trait]
pub trait FeedbackLog: Send + Sync {
    /// Appends one entry.
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), FeedbackLogError>;

    /// Reads every entry.
    ///
    /// A log that does not exist yet reads as an empty snapshot.
    async fn read_all(&self) -> Result<FeedbackSnapshot, FeedbackLogError>;

    /// Returns the raw log contents for download, header included.
    async fn export(&self) -> Result<Vec<u8>, FeedbackLogError>;
}
