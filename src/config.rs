use dotenvy::dotenv;
use std::env;

use crate::error::ConfigError;

pub const DEFAULT_OLLAMA_API_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_OLLAMA_MODEL_NAME: &str = "mistral";
/// DuckDuckGo's HTML-only results page. Plain markup, no JS required.
pub const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Process-wide settings. Built once at startup and handed to the pipeline,
/// which never mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ollama_api_url: String,
    pub ollama_model_name: String,
    pub search_url: String,
    pub bind_addr: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ollama_api_url: DEFAULT_OLLAMA_API_URL.to_string(),
            ollama_model_name: DEFAULT_OLLAMA_MODEL_NAME.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Reads the environment (and `.env`, if present), falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Config {
        dotenv().ok(); // Load .env file if present
        Config {
            ollama_api_url: get_env_or_default("OLLAMA_API_URL", DEFAULT_OLLAMA_API_URL),
            ollama_model_name: get_env_or_default("OLLAMA_MODEL_NAME", DEFAULT_OLLAMA_MODEL_NAME),
            search_url: get_env_or_default("SEARCH_URL", DEFAULT_SEARCH_URL),
            bind_addr: get_env_or_default("RAGCHAT_BIND_ADDR", DEFAULT_BIND_ADDR),
            log_level: get_env_or_default("RAGCHAT_LOG_LEVEL", DEFAULT_LOG_LEVEL),
        }
    }

    pub fn with_ollama_api_url(mut self, url: impl Into<String>) -> Config {
        self.ollama_api_url = url.into();
        self
    }

    pub fn with_ollama_model_name(mut self, model: impl Into<String>) -> Config {
        self.ollama_model_name = model.into();
        self
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Config {
        self.search_url = url.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Config {
        self.bind_addr = addr.into();
        self
    }

    /// Checks that both outbound URLs parse before any request is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("OLLAMA_API_URL", &self.ollama_api_url),
            ("SEARCH_URL", &self.search_url),
        ] {
            url::Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
                key,
                value: value.clone(),
                source,
            })?;
        }
        if self.ollama_model_name.trim().is_empty() {
            return Err(ConfigError::EmptyModelName);
        }
        Ok(())
    }

    pub fn max_log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_ollama() {
        let config = Config::default();
        assert_eq!(config.ollama_api_url, "http://localhost:11434/api/generate");
        assert_eq!(config.ollama_model_name, "mistral");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unparseable_url() {
        let config = Config::default().with_ollama_api_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("OLLAMA_API_URL"));
    }

    #[test]
    fn rejects_blank_model() {
        let config = Config::default().with_ollama_model_name("  ");
        assert!(matches!(config.validate(), Err(ConfigError::EmptyModelName)));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let mut config = Config::default();
        config.log_level = "chatty".to_string();
        assert_eq!(config.max_log_level(), tracing::Level::INFO);
        config.log_level = "debug".to_string();
        assert_eq!(config.max_log_level(), tracing::Level::DEBUG);
    }
}
