use anyhow::{Context, Result};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// The completion credential is NOT configured here: it arrives with every analysis request.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_url: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_URL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            llm_timeout_secs: 120,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}
