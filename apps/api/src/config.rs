use anyhow::{bail, Context, Result};

pub const DEFAULT_STUDY_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REVIEW_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if the inference API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    /// Model used for summaries, MCQs, answer keys and questions.
    pub study_model: String,
    /// Model used for resume reviews.
    pub review_model: String,
    pub inference_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub session_idle_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_api_key()?,
            gemini_api_base: env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            study_model: env_or("STUDY_MODEL", DEFAULT_STUDY_MODEL),
            review_model: env_or("REVIEW_MODEL", DEFAULT_REVIEW_MODEL),
            inference_timeout_secs: parse_env("INFERENCE_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            session_idle_ttl_secs: parse_env("SESSION_IDLE_TTL_SECS", 3600)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// `GEMINI_API_KEY`, falling back to the older `GENAI_API_KEY` name.
/// A blank value is treated the same as an unset one.
fn require_api_key() -> Result<String> {
    let key = require_env("GEMINI_API_KEY").or_else(|primary| {
        require_env("GENAI_API_KEY").map_err(|_| primary)
    })?;
    if key.trim().is_empty() {
        bail!("Required environment variable 'GEMINI_API_KEY' is empty");
    }
    Ok(key)
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for unit tests; never reads the environment.
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            study_model: DEFAULT_STUDY_MODEL.to_string(),
            review_model: DEFAULT_REVIEW_MODEL.to_string(),
            inference_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
            session_idle_ttl_secs: 60,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
