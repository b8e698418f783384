//! Assistant configuration loaded from TOML

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::responses::ResponseTable;

/// Top-level configuration. Every field has a default.
///
/// ```toml
/// assistant_name = "Niley"
/// default_user_name = "Friend"
///
/// [services]
/// timeout_secs = 8
/// fallback_city = "London"
///
/// [responses]
/// thank = ["Cheers!", "No problem."]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub assistant_name: String,
    pub default_user_name: String,
    pub services: ServicesConfig,
    /// Whole-table replacements keyed by table name (`greeting`, `unknown`, ...).
    pub responses: BTreeMap<String, Vec<String>>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            assistant_name: "Niley".to_string(),
            default_user_name: "Friend".to_string(),
            services: ServicesConfig::default(),
            responses: BTreeMap::new(),
        }
    }
}

impl AssistantConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        // surface bad response tables at load time rather than first use
        config.response_table()?;
        Ok(config)
    }

    /// Default tables for `assistant_name` with the configured overrides applied.
    pub fn response_table(&self) -> Result<ResponseTable, ConfigError> {
        ResponseTable::defaults(&self.assistant_name).with_overrides(&self.responses)
    }
}

/// Endpoints and limits for [`crate::services::WebServices`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub timeout_secs: u64,
    pub location_timeout_secs: u64,
    pub user_agent: String,
    pub search_url: String,
    pub weather_url: String,
    pub location_url: String,
    pub news_url: String,
    pub fallback_city: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 8,
            location_timeout_secs: 5,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            search_url: "https://duckduckgo.com/html/".to_string(),
            weather_url: "https://wttr.in/".to_string(),
            location_url: "https://ipinfo.io/city".to_string(),
            news_url: "https://www.reddit.com/r/worldnews/.json".to_string(),
            fallback_city: "London".to_string(),
        }
    }
}
