use std::env;

use anyhow::{Context, Result, bail};
use picker_interaction::openai_upstream::{BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_OPENAI_MODEL};
use tracing::info;

pub const DEFAULT_PORT: u16 = 3000;

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub model: String,
    pub upstream_url: String,
    pub max_tokens: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("upstream_url", &self.upstream_url)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Fails when `OPENAI_API_KEY` is unset or blank, or when `PORT` is not a
    /// port number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let Some(api_key) = var("OPENAI_API_KEY") else {
            bail!("OPENAI_API_KEY is not set; refusing to start without an upstream credential");
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PORT value: {raw}"))?,
            None => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        Ok(Self {
            port,
            api_key,
            model: var("OPENAI_MODEL_NAME").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            upstream_url: var("OPENAI_BASE_URL").unwrap_or_else(|| BASE_URL.to_string()),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_fatal() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.upstream_url, BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8080"),
            ("OPENAI_MODEL_NAME", "gpt-4o-mini"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9/v1/chat/completions"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.upstream_url, "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let result = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk"), ("PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
