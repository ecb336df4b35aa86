use anyhow::{ensure, Context, Result};

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Process configuration, read once at startup from the environment
/// (a local `.env` file is honored through dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// A missing or empty `GEMINI_API_KEY` fails here instead of on the
    /// first remote call.
    pub fn from_env() -> Result<Self> {
        let api_key = dotenvy::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set (environment or .env)")?;
        ensure!(!api_key.trim().is_empty(), "GEMINI_API_KEY is empty");

        let model = dotenvy::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            dotenvy::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let bind_addr =
            dotenvy::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let timeout_secs = dotenvy::var("REVIEW_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            bind_addr,
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }
}
