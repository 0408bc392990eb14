//! Intervention request, result and outcome types.

use serde::{Deserialize, Serialize};

use super::{BarrierCategory, SelectionReason, Technique};
use crate::domain::foundation::{RequestId, ValidationError};

/// Minimum goal length, in characters.
pub const MIN_GOAL_CHARS: usize = 5;

/// Minimum barrier length, in characters.
pub const MIN_BARRIER_CHARS: usize = 10;

/// A validated request for a personalized intervention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterventionRequest {
    goal: String,
    barrier: String,
    context: Option<String>,
}

impl InterventionRequest {
    /// Validates and trims the user's inputs.
    ///
    /// Goal and barrier must be non-blank and long enough to be specific.
    /// A blank context is treated as absent.
    pub fn new(
        goal: impl Into<String>,
        barrier: impl Into<String>,
        context: Option<String>,
    ) -> Result<Self, ValidationError> {
        let goal = goal.into().trim().to_string();
        let barrier = barrier.into().trim().to_string();

        if goal.is_empty() {
            return Err(ValidationError::empty_field("goal"));
        }
        if barrier.is_empty() {
            return Err(ValidationError::empty_field("barrier"));
        }
        let goal_len = goal.chars().count();
        if goal_len < MIN_GOAL_CHARS {
            return Err(ValidationError::too_short("goal", MIN_GOAL_CHARS, goal_len));
        }
        let barrier_len = barrier.chars().count();
        if barrier_len < MIN_BARRIER_CHARS {
            return Err(ValidationError::too_short(
                "barrier",
                MIN_BARRIER_CHARS,
                barrier_len,
            ));
        }

        let context = context
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            goal,
            barrier,
            context,
        })
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn barrier(&self) -> &str {
        &self.barrier
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

/// Which path produced the intervention text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionSource {
    /// Written by the text-generation service.
    Generated,
    /// Built locally from the technique template.
    Fallback,
}

/// The personalized message plus the technique metadata shown with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionResult {
    pub intervention_text: String,
    pub technique_name: String,
    pub theory: String,
    pub duration_minutes: u32,
    pub evidence: String,
    pub target_component: BarrierCategory,
    pub source: InterventionSource,
}

impl InterventionResult {
    /// Builds a result echoing `technique`'s metadata.
    pub fn from_technique(
        technique: &Technique,
        intervention_text: impl Into<String>,
        source: InterventionSource,
    ) -> Self {
        Self {
            intervention_text: intervention_text.into(),
            technique_name: technique.name.clone(),
            theory: technique.theory.clone(),
            duration_minutes: technique.duration_minutes,
            evidence: technique.evidence_base.clone(),
            target_component: technique.target_component,
            source,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == InterventionSource::Fallback
    }
}

/// Everything produced for one intervention request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterventionOutcome {
    pub request_id: RequestId,
    /// Category the barrier was classified into.
    pub barrier_category: BarrierCategory,
    pub selection: SelectionReason,
    pub intervention: InterventionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_inputs() {
        let request = InterventionRequest::new(
            "  exercise more ",
            " I'm always too tired ",
            Some("  ".to_string()),
        )
        .unwrap();

        assert_eq!(request.goal(), "exercise more");
        assert_eq!(request.barrier(), "I'm always too tired");
        assert_eq!(request.context(), None);
    }

    #[test]
    fn request_keeps_context() {
        let request = InterventionRequest::new(
            "study more",
            "I keep getting distracted",
            Some("I'm a student".to_string()),
        )
        .unwrap();

        assert_eq!(request.context(), Some("I'm a student"));
    }

    #[test]
    fn request_rejects_blank_goal() {
        let err = InterventionRequest::new("   ", "I'm always too tired", None).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("goal"));
    }

    #[test]
    fn request_rejects_blank_barrier() {
        let err = InterventionRequest::new("exercise", "", None).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("barrier"));
    }

    #[test]
    fn request_rejects_short_goal() {
        let err = InterventionRequest::new("run", "I'm always too tired", None).unwrap_err();
        assert_eq!(err, ValidationError::too_short("goal", 5, 3));
    }

    #[test]
    fn request_rejects_short_barrier() {
        let err = InterventionRequest::new("exercise", "tired", None).unwrap_err();
        assert_eq!(err, ValidationError::too_short("barrier", 10, 5));
    }

    #[test]
    fn result_echoes_technique_metadata() {
        let technique = Technique::new(
            "Temptation Bundling",
            BarrierCategory::Motivation,
            vec![],
            "Pair [GOAL] with fun.",
        )
        .with_theory("Behavioral Economics")
        .with_duration_minutes(5)
        .with_evidence("Milkman et al., 2014");

        let result =
            InterventionResult::from_technique(&technique, "Go!", InterventionSource::Generated);

        assert_eq!(result.intervention_text, "Go!");
        assert_eq!(result.technique_name, "Temptation Bundling");
        assert_eq!(result.theory, "Behavioral Economics");
        assert_eq!(result.duration_minutes, 5);
        assert_eq!(result.evidence, "Milkman et al., 2014");
        assert_eq!(result.target_component, BarrierCategory::Motivation);
        assert!(!result.is_fallback());
    }

    #[test]
    fn source_serializes_lowercase() {
        let json = serde_json::to_string(&InterventionSource::Fallback).unwrap();
        assert_eq!(json, "\"fallback\"");
    }
}
