//! Sampling settings shared by every text-generation call.

use crate::ports::CompletionRequest;

/// Sampling parameters applied to classifier and generator requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

impl GenerationSettings {
    /// Copies these settings onto a request.
    pub fn apply(&self, request: CompletionRequest) -> CompletionRequest {
        request
            .with_temperature(self.temperature)
            .with_top_p(self.top_p)
            .with_top_k(self.top_k)
            .with_max_tokens(self.max_output_tokens)
    }
}
