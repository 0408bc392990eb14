//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that the coaching and feedback modules build on.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::RequestId;
pub use timestamp::{Timestamp, LOG_TIMESTAMP_FORMAT};
