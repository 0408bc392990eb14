//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (intervention requests, feedback) are kept apart from
//! query handlers (statistics, history, export).

pub mod handlers;

pub use handlers::*;
