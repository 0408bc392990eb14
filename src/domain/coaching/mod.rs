//! Coaching module - COM-B classification, technique selection and
//! intervention messages.
//!
//! The pure parts live here: categories, the technique catalog, the
//! selection rule and prompt construction. Calls to the text-generation
//! service are made by the application handlers.

mod catalog;
mod category;
mod errors;
mod intervention;
mod prompts;
mod selector;
mod technique;

pub use catalog::TechniqueCatalog;
pub use category::BarrierCategory;
pub use errors::{CatalogError, CoachingError};
pub use intervention::{
    InterventionOutcome, InterventionRequest, InterventionResult, InterventionSource,
    MIN_BARRIER_CHARS, MIN_GOAL_CHARS,
};
pub use prompts::{
    classification_prompt, fallback_message, intervention_prompt, MAX_INTERVENTION_WORDS,
};
pub use selector::{select_technique, Selection, SelectionReason};
pub use technique::{Technique, GOAL_PLACEHOLDER};
