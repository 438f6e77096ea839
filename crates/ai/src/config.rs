//! Analyzer configuration read from the environment.

use log::warn;
use std::time::Duration;
use wealthjournal_core::constants::DEFAULT_ANALYSIS_TIMEOUT_SECS;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Older deployments exported the key under this name.
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";
pub const MODEL_ENV: &str = "WJ_AI_MODEL";
pub const BASE_URL_ENV: &str = "WJ_AI_BASE_URL";
pub const TIMEOUT_ENV: &str = "WJ_ANALYSIS_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the Gemini analyzer.
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// `None` when no credential is configured.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_ANALYSIS_TIMEOUT_SECS),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout = match non_empty(TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "Ignoring invalid {}={:?}, using {}s",
                        TIMEOUT_ENV,
                        raw,
                        defaults.timeout.as_secs()
                    );
                    defaults.timeout
                }
            },
            None => defaults.timeout,
        };

        Self {
            api_key: non_empty(API_KEY_ENV).or_else(|| non_empty(LEGACY_API_KEY_ENV)),
            model: non_empty(MODEL_ENV).unwrap_or(defaults.model),
            base_url: non_empty(BASE_URL_ENV)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
