use std::env;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TURNS: usize = 10;
const MAX_TURNS_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not found! Please set it in your .env file or environment.")]
    ApiKeyNotSet,
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    #[cfg(test)]
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Runtime settings resolved from `.env`, the environment, and CLI overrides.
///
/// Environment variables:
/// - `OPENAI_API_KEY`: required
/// - `OPENAI_MODEL`: model identifier (default `gpt-4o-mini`)
/// - `OPENAI_BASE_URL`: API root (default `https://api.openai.com/v1`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub model: String,
    pub base_url: String,
    pub max_turns: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = non_blank(lookup("OPENAI_API_KEY")).ok_or(ConfigError::ApiKeyNotSet)?;
        let model = non_blank(lookup("OPENAI_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url =
            non_blank(lookup("OPENAI_BASE_URL")).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            api_key: ApiKey(api_key),
            model,
            base_url,
            max_turns: DEFAULT_MAX_TURNS,
        })
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = non_blank(model) {
            self.model = model;
        }
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.clamp(1, MAX_TURNS_LIMIT);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
