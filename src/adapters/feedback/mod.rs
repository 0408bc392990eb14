//! Feedback log adapters.
//!
//! - `CsvFeedbackLog` - Append-only CSV file
//! - `InMemoryFeedbackLog` - Vector-backed log for tests

mod csv_feedback_log;
mod in_memory_feedback_log;

pub use csv_feedback_log::{CsvFeedbackLog, LOG_HEADER};
pub use in_memory_feedback_log::InMemoryFeedbackLog;

pub(crate) use csv_feedback_log::encode_csv;
