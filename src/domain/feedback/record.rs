//! Feedback records and logged entries.

use serde::{Deserialize, Serialize};

use super::{Rating, TrialIntent};
use crate::domain::coaching::{BarrierCategory, InterventionResult};
use crate::domain::foundation::{Timestamp, ValidationError};

/// A user's feedback on one intervention, before it is logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub user_goal: String,
    pub user_barrier: String,
    pub target_component: BarrierCategory,
    pub technique_used: String,
    pub theory: String,
    pub rating: Rating,
    pub would_try: TrialIntent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_text: Option<String>,
}

impl FeedbackRecord {
    /// Builds a record for an intervention the user has just seen.
    pub fn for_intervention(
        goal: impl Into<String>,
        barrier: impl Into<String>,
        intervention: &InterventionResult,
        rating: Rating,
        would_try: TrialIntent,
        feedback_text: Option<String>,
    ) -> Self {
        Self {
            user_goal: goal.into(),
            user_barrier: barrier.into(),
            target_component: intervention.target_component,
            technique_used: intervention.technique_name.clone(),
            theory: intervention.theory.clone(),
            rating,
            would_try,
            feedback_text,
        }
    }

    /// Checks required text fields and normalizes an empty comment to `None`.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.user_goal = self.user_goal.trim().to_string();
        self.user_barrier = self.user_barrier.trim().to_string();
        self.technique_used = self.technique_used.trim().to_string();

        if self.user_goal.is_empty() {
            return Err(ValidationError::empty_field("user_goal"));
        }
        if self.user_barrier.is_empty() {
            return Err(ValidationError::empty_field("user_barrier"));
        }
        if self.technique_used.is_empty() {
            return Err(ValidationError::empty_field("technique_used"));
        }

        self.feedback_text = self
            .feedback_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(self)
    }
}

/// A feedback record as stored in the log, with its server timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub record: FeedbackRecord,
}

impl FeedbackEntry {
    pub fn new(timestamp: Timestamp, record: FeedbackRecord) -> Self {
        Self { timestamp, record }
    }

    /// Stamps a record with the current time.
    pub fn now(record: FeedbackRecord) -> Self {
        Self::new(Timestamp::now(), record)
    }
}
