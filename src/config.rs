/// Startup configuration
///
/// All settings come from the process environment. An optional `.env` file
/// in the working directory is loaded first so the API key can live outside
/// the shell profile.

use std::env;

use crate::error::ConfigError;

/// Default model used for restoration
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Default base URL of the generative language API
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential sent with every request
    pub api_key: String,
    /// Model name, e.g. "gemini-2.5-flash-image"
    pub model: String,
    /// Base URL without a trailing slash
    pub endpoint: String,
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    ///
    /// Fails if no API key is set. The application cannot do anything
    /// useful without one, so callers treat this as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_blank("API_KEY")
            .or_else(|| non_blank("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let model = non_blank("RESTORER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = non_blank("RESTORER_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let result = Config::from_lookup(lookup_from(&[("API_KEY", "   ")]));
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_gemini_key_fallback_and_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "fallback"),
            ("RESTORER_MODEL", "custom-model"),
            ("RESTORER_ENDPOINT", "http://127.0.0.1:9000/v1/"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "fallback");
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn test_primary_key_wins_over_fallback() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_KEY", "primary"),
            ("GEMINI_API_KEY", "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "primary");
    }
}
