//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing tests and offline runs to work without calling real AI APIs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for fallback testing
//! - Call counting, plus opt-in recording of full requests for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Motivation")
//!     .with_error(MockError::Unavailable { message: "down".into() });
//!
//! let response = provider.complete(request).await?;
//! assert_eq!(response.content, "Motivation");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Returned once the queue is drained.
    default_response: String,
    info: ProviderInfo,
    delay: Duration,
    call_count: Arc<AtomicUsize>,
    /// Full request history, kept only after `with_call_recording`.
    calls: Option<Arc<Mutex<Vec<CompletionRequest>>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success { content: String },
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::ContentFiltered { reason } => AIError::content_filtered(reason),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_response: "Mock response".to_string(),
            info: ProviderInfo::new("mock", "mock-model-1", 128000),
            delay: Duration::ZERO,
            call_count: Arc::new(AtomicUsize::new(0)),
            calls: None,
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
        });
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets the content returned once queued responses run out.
    pub fn with_default_response(mut self, content: impl Into<String>) -> Self {
        self.default_response = content.into();
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Keeps every request for inspection with [`MockAIProvider::get_calls`].
    ///
    /// Off by default; the `mock` runtime provider only counts calls.
    pub fn with_call_recording(mut self) -> Self {
        self.calls = Some(Arc::new(Mutex::new(Vec::new())));
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Returns all recorded calls. Empty unless recording is enabled.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls
            .as_ref()
            .map(|calls| lock(calls).clone())
            .unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: self.default_response.clone(),
            })
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let prompt_tokens = (request.prompt.len() / 4).max(1) as u32;
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(calls) = &self.calls {
            lock(calls).push(request);
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content } => Ok(CompletionResponse {
                usage: TokenUsage::new(prompt_tokens, (content.len() / 4) as u32),
                content,
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RequestId;
    use crate::ports::{CompletionPurpose, RequestMetadata};

    fn test_request(prompt: &str) -> CompletionRequest {
        CompletionRequest::new(
            prompt,
            RequestMetadata::new(RequestId::new(), CompletionPurpose::Classification),
        )
    }

    #[tokio::test]
    async fn returns_configured_responses_in_order() {
        let provider = MockAIProvider::new()
            .with_response("First")
            .with_response("Second");

        let first = provider.complete(test_request("a")).await.unwrap();
        let second = provider.complete(test_request("b")).await.unwrap();

        assert_eq!(first.content, "First");
        assert_eq!(second.content, "Second");
    }

    #[tokio::test]
    async fn returns_default_when_queue_empty() {
        let provider = MockAIProvider::new().with_default_response("Capability");
        let response = provider.complete(test_request("a")).await.unwrap();
        assert_eq!(response.content, "Capability");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });

        let result = provider.complete(test_request("a")).await;
        assert!(matches!(result, Err(AIError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn records_calls_when_enabled() {
        let provider = MockAIProvider::new().with_call_recording();
        provider.complete(test_request("one")).await.unwrap();
        provider.complete(test_request("two")).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        let calls = provider.get_calls();
        assert_eq!(calls[0].prompt, "one");
        assert_eq!(calls[1].prompt, "two");
    }

    #[tokio::test]
    async fn counts_calls_without_keeping_requests_by_default() {
        let provider = MockAIProvider::new();
        let prompt = "x".repeat(1024);
        for _ in 0..1_000 {
            provider.complete(test_request(&prompt)).await.unwrap();
        }

        assert_eq!(provider.call_count(), 1_000);
        assert!(provider.get_calls().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let provider = MockAIProvider::new().with_response("shared");
        let clone = provider.clone();

        let response = clone.complete(test_request("a")).await.unwrap();
        assert_eq!(response.content, "shared");
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn mock_errors_convert() {
        let err: AIError = MockError::RateLimited {
            retry_after_secs: 5,
        }
        .into();
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 5 }));

        let err: AIError = MockError::AuthenticationFailed.into();
        assert!(matches!(err, AIError::AuthenticationFailed));
    }
}
