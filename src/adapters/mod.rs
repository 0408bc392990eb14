//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-generation providers (Gemini, OpenAI, mock)
//! - `catalog` - Technique library loading
//! - `feedback` - Feedback log storage (CSV, in-memory)
//! - `http` - REST API

pub mod ai;
pub mod catalog;
pub mod feedback;
pub mod http;

pub use ai::{build_provider, GeminiProvider, MockAIProvider, OpenAIProvider};
pub use catalog::load_catalog;
pub use feedback::{CsvFeedbackLog, InMemoryFeedbackLog};
pub use http::{build_router, CoachingAppState};
