//! Application configuration

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::value_objects::WhisperMode;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base script dealt when a game does not name one
    pub default_script: String,
    /// How long interactive prompts wait before resolving to no answer
    pub prompt_timeout: Duration,
    /// Default whisper policy for new games
    pub whisper_mode: WhisperMode,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let prompt_timeout_secs: u64 = env::var("PROMPT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("PROMPT_TIMEOUT_SECS must be a number of seconds")?;

        let whisper_mode = match env::var("WHISPER_MODE")
            .unwrap_or_else(|_| "all".to_string())
            .to_lowercase()
            .as_str()
        {
            "all" => WhisperMode::All,
            "neighbors" => WhisperMode::Neighbors,
            "storytellers" | "storytellers_only" => WhisperMode::StorytellersOnly,
            other => anyhow::bail!("unknown WHISPER_MODE '{}'", other),
        };

        Ok(Self {
            default_script: env::var("DEFAULT_SCRIPT")
                .unwrap_or_else(|_| "Trouble Brewing".to_string()),
            prompt_timeout: Duration::from_secs(prompt_timeout_secs),
            whisper_mode,
        })
    }
}
