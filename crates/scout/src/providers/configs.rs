use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

pub const OPENAI_DEFAULT_HOST: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const OPENAI_DEFAULT_TIMEOUT_SECS: u64 = 120;

pub trait ProviderConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self>
    where
        Self: Sized;

    /// Helper function to get environment variables with error handling
    fn get_env(key: &str, required: bool, default: Option<String>) -> Result<Option<String>> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) if !required => Ok(default),
            Err(env::VarError::NotPresent) => Err(anyhow!(
                "Environment variable '{}' is required but not set.",
                key
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    /// Upper bound on a single chat-completions request
    pub timeout: Duration,
}

impl OpenAiProviderConfig {
    pub fn new<K: Into<String>>(api_key: K) -> Self {
        Self {
            host: OPENAI_DEFAULT_HOST.to_string(),
            api_key: api_key.into(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
            timeout: Duration::from_secs(OPENAI_DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig for OpenAiProviderConfig {
    fn from_env() -> Result<Self> {
        let api_key = Self::get_env("OPENAI_API_KEY", true, None)?
            .ok_or_else(|| anyhow!("OpenAI API key should be present"))?;

        let host = Self::get_env("OPENAI_HOST", false, None)?
            .unwrap_or_else(|| OPENAI_DEFAULT_HOST.to_string());

        let model = Self::get_env("OPENAI_MODEL", false, None)?
            .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string());

        let temperature = Self::get_env("OPENAI_TEMPERATURE", false, None)?
            .map(|v| v.parse::<f32>())
            .transpose()
            .context("OPENAI_TEMPERATURE must be a number")?;

        let max_tokens = Self::get_env("OPENAI_MAX_TOKENS", false, None)?
            .map(|v| v.parse::<i32>())
            .transpose()
            .context("OPENAI_MAX_TOKENS must be an integer")?;

        let timeout_secs = Self::get_env("OPENAI_TIMEOUT_SECS", false, None)?
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("OPENAI_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(OPENAI_DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            host,
            api_key,
            model,
            temperature,
            max_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
