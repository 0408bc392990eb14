//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BARRIER_COACH` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use barrier_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Catalog at {}", config.storage.catalog_path.display());
//! ```

mod ai;
mod error;
mod server;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use server::{LogFormat, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration apart from the provider API key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-generation provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Catalog and feedback log locations
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BARRIER_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BARRIER_COACH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BARRIER_COACH__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `BARRIER_COACH__STORAGE__FEEDBACK_LOG_PATH=data/feedback.csv`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BARRIER_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const TEST_VARS: [&str; 6] = [
        "BARRIER_COACH__AI__GEMINI_API_KEY",
        "BARRIER_COACH__AI__PROVIDER",
        "BARRIER_COACH__SERVER__PORT",
        "BARRIER_COACH__SERVER__LOG_FORMAT",
        "BARRIER_COACH__STORAGE__FEEDBACK_LOG_PATH",
        "BARRIER_COACH__STORAGE__RECENT_LIMIT",
    ];

    fn set_minimal_env() {
        env::set_var("BARRIER_COACH__AI__GEMINI_API_KEY", "test-gemini-key");
    }

    fn clear_env() {
        for var in TEST_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        let key = config.ai.gemini_api_key.as_ref().unwrap();
        assert_eq!(key.expose_secret(), "test-gemini-key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply_to_missing_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.provider, AiProvider::Gemini);
        assert_eq!(
            config.storage.catalog_path,
            PathBuf::from("techniques_library.json")
        );
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("BARRIER_COACH__SERVER__PORT", "3000");
        env::set_var("BARRIER_COACH__SERVER__LOG_FORMAT", "json");
        env::set_var("BARRIER_COACH__STORAGE__FEEDBACK_LOG_PATH", "data/log.csv");
        env::set_var("BARRIER_COACH__STORAGE__RECENT_LIMIT", "10");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(
            config.storage.feedback_log_path,
            PathBuf::from("data/log.csv")
        );
        assert_eq!(config.storage.recent_limit, 10);
    }

    #[test]
    fn test_mock_provider_validates_without_keys() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("BARRIER_COACH__AI__PROVIDER", "mock");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );
    }
}
