use anyhow::{Context, Result};

use crate::llm_client::OPENAI_API_URL;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// `openai_api_key` may be absent at startup; each parse request then fails
/// with `MissingCredential`.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    /// Chat-completions URL; an OpenAI-compatible gateway may stand in.
    pub openai_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub openai_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_api_url: optional_env("OPENAI_API_URL")
                .unwrap_or_else(|| OPENAI_API_URL.to_string()),
            port: parse_env("PORT", DEFAULT_PORT)
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            openai_timeout_secs: parse_env("OPENAI_TIMEOUT_SECS", DEFAULT_OPENAI_TIMEOUT_SECS)
                .context("OPENAI_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            openai_api_url: OPENAI_API_URL.to_string(),
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            openai_timeout_secs: DEFAULT_OPENAI_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Empty values count as unset so `OPENAI_API_KEY=` in a .env file behaves like no key.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for environment variable '{key}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u16 = parse_env("RESUME_PARSER_TEST_UNSET_PORT", 9000).unwrap();
        assert_eq!(value, 9000);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_PARSER_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_env("RESUME_PARSER_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_targets_openai() {
        let config = Config::default();
        assert_eq!(config.openai_api_url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(config.port, 8080);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("RESUME_PARSER_TEST_BLANK_KEY", "   ");
        assert_eq!(optional_env("RESUME_PARSER_TEST_BLANK_KEY"), None);
    }
}
