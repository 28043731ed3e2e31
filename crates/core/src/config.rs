//! Upstream runtime configuration.
//!
//! Configuration is resolved once at process startup and then injected into the
//! generation client. Request handling never reads process-wide environment variables;
//! the credential travels inside [`UpstreamConfig`] instead of living in a global.

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_API_URL, ENV_MAX_TOKENS, ENV_MODEL, ENV_TEMPERATURE,
    ENV_TIMEOUT_SECS,
};
use crate::{AssessmentError, AssessmentResult};
use std::fmt;
use std::time::Duration;

/// Settings for the external chat-completion service.
#[derive(Clone)]
pub struct UpstreamConfig {
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
}

impl UpstreamConfig {
    /// Create a configuration with default endpoint, model and bounds.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidConfig` if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> AssessmentResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AssessmentError::InvalidConfig(format!(
                "{ENV_API_KEY} cannot be empty"
            )));
        }

        Ok(Self {
            api_key,
            api_url: DEFAULT_API_URL.into(),
            model: DEFAULT_MODEL.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Resolve a configuration from a key lookup, typically `|k| std::env::var(k).ok()`.
    ///
    /// Blank values fall back to defaults, except the API key which is required.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::InvalidConfig` if:
    /// - the API key is missing or blank,
    /// - a numeric override does not parse,
    /// - the temperature is outside `0.0..=2.0`, or max tokens / timeout is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AssessmentResult<Self> {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = value(ENV_API_KEY).ok_or_else(|| {
            AssessmentError::InvalidConfig(format!("{ENV_API_KEY} is not set"))
        })?;

        let mut cfg = Self::new(api_key)?;
        if let Some(url) = value(ENV_API_URL) {
            cfg = cfg.with_api_url(url);
        }
        if let Some(model) = value(ENV_MODEL) {
            cfg = cfg.with_model(model);
        }
        if let Some(raw) = value(ENV_MAX_TOKENS) {
            cfg = cfg.with_max_tokens(parse_number(ENV_MAX_TOKENS, &raw)?)?;
        }
        if let Some(raw) = value(ENV_TEMPERATURE) {
            cfg = cfg.with_temperature(parse_number(ENV_TEMPERATURE, &raw)?)?;
        }
        if let Some(raw) = value(ENV_TIMEOUT_SECS) {
            let secs: u64 = parse_number(ENV_TIMEOUT_SECS, &raw)?;
            cfg = cfg.with_timeout(Duration::from_secs(secs))?;
        }

        Ok(cfg)
    }

    /// Overrides the chat-completion endpoint.
    ///
    /// # Arguments
    /// * `api_url` - Full URL the completion request is posted to
    ///
    /// # Returns
    /// The updated configuration.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Overrides the model name sent with every request.
    ///
    /// # Returns
    /// The updated configuration.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the completion length bound.
    ///
    /// # Arguments
    /// * `max_tokens` - Upper bound on generated tokens
    ///
    /// # Returns
    /// The updated configuration.
    ///
    /// # Errors
    /// Returns `AssessmentError::InvalidConfig` if `max_tokens` is zero.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> AssessmentResult<Self> {
        if max_tokens == 0 {
            return Err(AssessmentError::InvalidConfig(
                "max tokens must be greater than zero".into(),
            ));
        }
        self.max_tokens = max_tokens;
        Ok(self)
    }

    /// Sets the sampling temperature.
    ///
    /// # Returns
    /// The updated configuration.
    ///
    /// # Errors
    /// Returns `AssessmentError::InvalidConfig` if `temperature` is outside `0.0..=2.0`.
    pub fn with_temperature(mut self, temperature: f32) -> AssessmentResult<Self> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AssessmentError::InvalidConfig(format!(
                "temperature must be between 0 and 2, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }

    /// Sets the bound on a single upstream attempt.
    ///
    /// # Returns
    /// The updated configuration.
    ///
    /// # Errors
    /// Returns `AssessmentError::InvalidConfig` if `timeout` is zero.
    pub fn with_timeout(mut self, timeout: Duration) -> AssessmentResult<Self> {
        if timeout.is_zero() {
            return Err(AssessmentError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Bearer token for the upstream. Never log this value.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Endpoint the completion request is posted to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Bound on a single upstream attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// The API key must never reach the logs.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> AssessmentResult<T> {
    raw.parse::<T>()
        .map_err(|_| AssessmentError::InvalidConfig(format!("{key} is not a valid number: {raw}")))
}
