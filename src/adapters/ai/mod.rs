//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini models
//! - `OpenAIProvider` - OpenAI chat models
//! - `MockAIProvider` - Configurable mock for testing and offline runs

mod gemini_provider;
mod mock_provider;
mod openai_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};

use std::sync::Arc;

use crate::config::{AiConfig, AiProvider};
use crate::ports::{AIError, AIProvider as AIProviderPort};

/// Builds the provider selected in configuration.
///
/// Keys come only from `config`; a missing key for the selected provider is
/// an `AuthenticationFailed` error.
pub fn build_provider(config: &AiConfig) -> Result<Arc<dyn AIProviderPort>, AIError> {
    match config.provider {
        AiProvider::Gemini => {
            let key = config
                .gemini_api_key
                .clone()
                .ok_or(AIError::AuthenticationFailed)?;
            let mut provider_config = GeminiConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model);
            }
            if let Some(url) = &config.base_url {
                provider_config = provider_config.with_base_url(url);
            }
            Ok(Arc::new(GeminiProvider::new(provider_config)?))
        }
        AiProvider::OpenAI => {
            let key = config
                .openai_api_key
                .clone()
                .ok_or(AIError::AuthenticationFailed)?;
            let mut provider_config = OpenAIConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = &config.model {
                provider_config = provider_config.with_model(model);
            }
            if let Some(url) = &config.base_url {
                provider_config = provider_config.with_base_url(url);
            }
            Ok(Arc::new(OpenAIProvider::new(provider_config)?))
        }
        AiProvider::Mock => Ok(Arc::new(MockAIProvider::new())),
    }
}
