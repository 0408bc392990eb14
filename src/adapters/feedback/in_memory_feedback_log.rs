//! In-Memory Feedback Log Adapter
//!
//! Keeps entries in a vector. Useful for testing and development.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::encode_csv;
use crate::domain::feedback::FeedbackEntry;
use crate::ports::{FeedbackLog, FeedbackLogError, FeedbackSnapshot};

/// In-memory feedback log
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackLog {
    entries: Arc<RwLock<Vec<FeedbackEntry>>>,
    /// When set, every operation fails with an I/O error.
    unavailable: Arc<AtomicBool>,
}

impl InMemoryFeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-populated with entries
    pub fn with_entries(entries: Vec<FeedbackEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            unavailable: Arc::default(),
        }
    }

    /// Make subsequent operations fail (simulates an unreadable log file)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Get the number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), FeedbackLogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(FeedbackLogError::Io("feedback log unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FeedbackLog for InMemoryFeedbackLog {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), FeedbackLogError> {
        self.check_available()?;
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<FeedbackSnapshot, FeedbackLogError> {
        self.check_available()?;
        Ok(FeedbackSnapshot {
            entries: self.entries.read().await.clone(),
            skipped_rows: 0,
        })
    }

    async fn export(&self) -> Result<Vec<u8>, FeedbackLogError> {
        self.check_available()?;
        encode_csv(&self.entries.read().await)
    }
}
