//! Coaching HTTP adapter module.
//!
//! REST endpoints for interventions and feedback.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{ApiError, CoachingAppState};
pub use routes::coaching_router;
