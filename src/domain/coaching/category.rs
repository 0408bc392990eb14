//! COM-B barrier categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The three COM-B components a barrier can be missing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BarrierCategory {
    /// Lack of skills, knowledge or ability.
    Capability,
    /// Lack of time, resources or external support.
    Opportunity,
    /// Lack of desire, willpower or interest.
    #[default]
    Motivation,
}

impl BarrierCategory {
    /// All categories in COM-B order.
    pub const ALL: [BarrierCategory; 3] = [
        BarrierCategory::Capability,
        BarrierCategory::Opportunity,
        BarrierCategory::Motivation,
    ];

    /// Maps a free-form model answer onto a category.
    ///
    /// Matching is by case-insensitive substring so that answers like
    /// "Capability." or "OPPORTUNITY - they lack time" still resolve.
    /// Anything unrecognised is treated as a motivation barrier.
    pub fn from_model_answer(answer: &str) -> Self {
        let answer = answer.trim().to_lowercase();
        if answer.contains("capab") {
            BarrierCategory::Capability
        } else if answer.contains("opportun") {
            BarrierCategory::Opportunity
        } else {
            BarrierCategory::Motivation
        }
    }

    /// Lowercase wire name, as stored in the feedback log.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierCategory::Capability => "capability",
            BarrierCategory::Opportunity => "opportunity",
            BarrierCategory::Motivation => "motivation",
        }
    }

    /// Title-case label for display.
    pub fn label(&self) -> &'static str {
        match self {
            BarrierCategory::Capability => "Capability",
            BarrierCategory::Opportunity => "Opportunity",
            BarrierCategory::Motivation => "Motivation",
        }
    }
}

impl fmt::Display for BarrierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarrierCategory {
    type Err = ValidationError;

    /// Strict parse of a stored category name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "capability" => Ok(BarrierCategory::Capability),
            "opportunity" => Ok(BarrierCategory::Opportunity),
            "motivation" => Ok(BarrierCategory::Motivation),
            other => Err(ValidationError::invalid_format(
                "target_component",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn model_answer_with_capability_maps_to_capability() {
        assert_eq!(
            BarrierCategory::from_model_answer("Capability"),
            BarrierCategory::Capability
        );
        assert_eq!(
            BarrierCategory::from_model_answer("  capability.\n"),
            BarrierCategory::Capability
        );
        assert_eq!(
            BarrierCategory::from_model_answer("CAPABILITY"),
            BarrierCategory::Capability
        );
    }

    #[test]
    fn model_answer_with_opportunity_maps_to_opportunity() {
        assert_eq!(
            BarrierCategory::from_model_answer("Opportunity"),
            BarrierCategory::Opportunity
        );
        assert_eq!(
            BarrierCategory::from_model_answer("I think it's an opportunity barrier"),
            BarrierCategory::Opportunity
        );
    }

    #[test]
    fn capability_wins_when_both_words_appear() {
        assert_eq!(
            BarrierCategory::from_model_answer("Opportunity or Capability"),
            BarrierCategory::Capability
        );
    }

    #[test]
    fn unrecognised_answer_defaults_to_motivation() {
        assert_eq!(
            BarrierCategory::from_model_answer("Motivation"),
            BarrierCategory::Motivation
        );
        assert_eq!(BarrierCategory::from_model_answer(""), BarrierCategory::Motivation);
        assert_eq!(
            BarrierCategory::from_model_answer("no idea"),
            BarrierCategory::Motivation
        );
    }

    #[test]
    fn default_is_motivation() {
        assert_eq!(BarrierCategory::default(), BarrierCategory::Motivation);
    }

    #[test]
    fn from_str_parses_stored_names() {
        assert_eq!(
            "capability".parse::<BarrierCategory>().unwrap(),
            BarrierCategory::Capability
        );
        assert_eq!(
            "Opportunity".parse::<BarrierCategory>().unwrap(),
            BarrierCategory::Opportunity
        );
        assert_eq!(
            " motivation ".parse::<BarrierCategory>().unwrap(),
            BarrierCategory::Motivation
        );
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!("willpower".parse::<BarrierCategory>().is_err());
        assert!("".parse::<BarrierCategory>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&BarrierCategory::Opportunity).unwrap();
        assert_eq!(json, "\"opportunity\"");
    }

    #[test]
    fn display_matches_as_str() {
        for category in BarrierCategory::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }

    proptest! {
        #[test]
        fn any_answer_maps_to_a_known_category(answer in ".*") {
            let category = BarrierCategory::from_model_answer(&answer);
            prop_assert!(BarrierCategory::ALL.contains(&category));
        }
    }
}
