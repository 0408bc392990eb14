//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `coaching` - COM-B categories, technique catalog, selection and prompts
//! - `feedback` - Ratings, trial-intent, log entries and aggregate statistics

pub mod coaching;
pub mod feedback;
pub mod foundation;
