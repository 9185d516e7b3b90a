/// Runtime configuration
///
/// The only external precondition is the Gemini credential. A `.env`
/// file is honored during development; otherwise plain environment
/// variables apply.

use std::env;

/// Model used when SKIN_ANALYZER_MODEL is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (required)
    pub api_key: String,
    /// Model name, e.g. "gemini-2.5-flash"
    pub model: String,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();

        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| "GEMINI_API_KEY must be set (environment or .env file)".to_string())?;

        let model = env::var("SKIN_ANALYZER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Config { api_key, model })
    }
}
