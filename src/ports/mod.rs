//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text-generation service used for classification and messages
//! - `FeedbackLog` - Append-only feedback storage

mod ai_provider;
mod feedback_log;

pub use ai_provider::{
    AIError, AIProvider, CompletionPurpose, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, RequestMetadata, TokenUsage,
};
pub use feedback_log::{FeedbackLog, FeedbackLogError, FeedbackSnapshot};
