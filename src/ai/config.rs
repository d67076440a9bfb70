//! Generation client configuration.
//!
//! Resolution order: environment variables first, then the config file at
//! `~/.autoglot/config.json`. An unreadable or invalid config file is
//! treated as absent rather than an error; only a missing API key aborts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".autoglot").join("config.json"))
}

fn load_config_file() -> Option<ClientConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return None;
    }

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<ClientConfig>(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("ignoring invalid config file {}: {}", path.display(), e);
            None
        }
    }
}

impl ClientConfig {
    /// Build the effective configuration.
    ///
    /// `model_override` (from `--model`) beats both the environment and the
    /// config file.
    pub fn resolve(model_override: Option<String>) -> Result<Self> {
        let file = load_config_file();

        let api_key = std::env::var("AUTOGLOT_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| file.as_ref().map(|c| c.api_key.clone()))
            .context(
                "no API key configured; set AUTOGLOT_API_KEY or add it to ~/.autoglot/config.json",
            )?;

        let base_url = std::env::var("AUTOGLOT_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| file.as_ref().map(|c| c.base_url.clone()))
            .unwrap_or_else(default_base_url);

        let model = model_override
            .or_else(|| std::env::var("AUTOGLOT_MODEL").ok().filter(|m| !m.is_empty()))
            .or_else(|| file.as_ref().map(|c| c.model.clone()))
            .unwrap_or_else(default_model);

        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_defaults_fill_missing_fields() {
        let config: ClientConfig = serde_json::from_str(r#"{"apiKey": "sk-test"}"#).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
