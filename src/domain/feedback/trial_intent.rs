//! Trial-intent: whether the user would try the suggested intervention.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The user's stated likelihood of trying the intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TrialIntent {
    Yes,
    Maybe,
    No,
}

impl TrialIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrialIntent::Yes => "Yes",
            TrialIntent::Maybe => "Maybe",
            TrialIntent::No => "No",
        }
    }

    /// Whether this answer counts toward the would-try percentage.
    pub fn is_open_to_trying(&self) -> bool {
        matches!(self, TrialIntent::Yes | TrialIntent::Maybe)
    }
}

impl FromStr for TrialIntent {
    type Err = ValidationError;

    /// Case-insensitive parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(TrialIntent::Yes),
            "maybe" => Ok(TrialIntent::Maybe),
            "no" => Ok(TrialIntent::No),
            other => Err(ValidationError::invalid_format(
                "would_try",
                format!("expected Yes, Maybe or No, got '{}'", other),
            )),
        }
    }
}

impl TryFrom<String> for TrialIntent {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrialIntent> for String {
    fn from(intent: TrialIntent) -> Self {
        intent.as_str().to_string()
    }
}

impl fmt::Display for TrialIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
