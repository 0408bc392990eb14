//! Technique records from the intervention catalog.

use serde::{Deserialize, Serialize};

use super::BarrierCategory;

/// Placeholder in a technique template that is replaced with the user's goal.
pub const GOAL_PLACEHOLDER: &str = "[GOAL]";

/// A catalogued intervention strategy.
///
/// Every technique targets exactly one COM-B category and is justified by one
/// behavioral theory. Records are immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technique {
    /// Identifier, also shown to the user. Catalog files may call this `id`.
    #[serde(alias = "id")]
    pub name: String,

    /// Category this technique addresses.
    #[serde(alias = "category")]
    pub target_component: BarrierCategory,

    /// Substrings that, found in a barrier, make this technique a direct match.
    #[serde(default, alias = "keywords")]
    pub barrier_keywords: Vec<String>,

    /// Message framework containing [`GOAL_PLACEHOLDER`].
    #[serde(alias = "template")]
    pub prompt_template: String,

    /// Behavioral theory the technique comes from.
    #[serde(default)]
    pub theory: String,

    /// Expected time to try the technique.
    #[serde(default)]
    pub duration_minutes: u32,

    /// Summary of the supporting evidence.
    #[serde(default, alias = "evidence")]
    pub evidence_base: String,
}

impl Technique {
    /// Creates a technique with empty theory and evidence.
    pub fn new(
        name: impl Into<String>,
        target_component: BarrierCategory,
        barrier_keywords: Vec<String>,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_component,
            barrier_keywords,
            prompt_template: prompt_template.into(),
            theory: String::new(),
            duration_minutes: 0,
            evidence_base: String::new(),
        }
    }

    /// Sets the behavioral theory.
    pub fn with_theory(mut self, theory: impl Into<String>) -> Self {
        self.theory = theory.into();
        self
    }

    /// Sets the expected duration.
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the evidence summary.
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence_base = evidence.into();
        self
    }

    /// Substitutes the goal into every placeholder of the template.
    pub fn fill_template(&self, goal: &str) -> String {
        self.prompt_template.replace(GOAL_PLACEHOLDER, goal)
    }

    /// Returns the first keyword (in stored order) contained in `barrier_lower`.
    ///
    /// `barrier_lower` must already be lower-cased.
    pub fn matching_keyword(&self, barrier_lower: &str) -> Option<&str> {
        self.barrier_keywords
            .iter()
            .map(String::as_str)
            .find(|keyword| barrier_lower.contains(*keyword))
    }

    /// Lower-cases keywords and drops blank ones.
    ///
    /// A blank keyword is a substring of every barrier and would turn the
    /// technique into an unconditional match.
    pub(crate) fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.barrier_keywords = self
            .barrier_keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }
}
