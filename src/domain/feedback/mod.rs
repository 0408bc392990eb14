//! Feedback module - ratings, trial-intent, logged entries and the
//! statistics derived from them.

mod rating;
mod record;
mod statistics;
mod trial_intent;

pub use rating::Rating;
pub use record::{FeedbackEntry, FeedbackRecord};
pub use statistics::{FeedbackStatistics, TechniquePerformance};
pub use trial_intent::TrialIntent;
