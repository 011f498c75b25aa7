use std::str::FromStr;
use std::time::Duration;

use crate::errors::RankerError;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.57;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 2000;
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_TOP_N: usize = 30;

/// Scoring configuration loaded from environment variables.
/// Fails at startup if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub batch_size: usize,
    pub top_n: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, RankerError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            temperature: parse_env("RANKER_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            max_retries: parse_env("RANKER_MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            retry_base_delay: Duration::from_millis(parse_env(
                "RANKER_RETRY_BASE_DELAY_MS",
                DEFAULT_RETRY_BASE_DELAY_MS,
            )?),
            batch_size: parse_env("RANKER_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            top_n: parse_env("RANKER_TOP_N", DEFAULT_TOP_N)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Config with defaults for everything except the credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Config {
            openai_api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            batch_size: DEFAULT_BATCH_SIZE,
            top_n: DEFAULT_TOP_N,
            rust_log: "info".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), RankerError> {
        if self.openai_api_key.trim().is_empty() {
            return Err(RankerError::Config(
                "OPENAI_API_KEY is set but empty".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(RankerError::InvalidBatchSize(0));
        }
        if self.max_retries == 0 {
            return Err(RankerError::Config(
                "RANKER_MAX_RETRIES must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String, RankerError> {
    std::env::var(key).map_err(|_| {
        RankerError::Config(format!(
            "Required environment variable '{key}' is not set (check your .env file)"
        ))
    })
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, RankerError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| RankerError::Config(format!("{key} has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}
