use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::format::Locale;

/// Main import configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Document fetching behavior
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Locale used for the nutrition table when no pantry service is configured
    #[serde(default)]
    pub locale: Locale,
    /// Append the nutrition table to the instructions when nutrition data is present
    #[serde(default = "default_embed_nutrition")]
    pub embed_nutrition: bool,
    /// Optional pantry service connection
    pub pantry: Option<PantryConfig>,
}

/// Configuration for the document fetcher
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in milliseconds, must be greater than 0
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Number of retries after the first failed attempt
    #[serde(default)]
    pub retry_attempts: u32,
    /// Delay between retries in milliseconds (grows linearly with each attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retry_attempts: 0,
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Connection details for the pantry service (Grocy)
#[derive(Debug, Deserialize, Clone)]
pub struct PantryConfig {
    /// Base URL of the pantry service, without the `/api` suffix
    pub base_url: String,
    /// API key sent in the `GROCY-API-KEY` header
    pub api_key: String,
    /// Request timeout in milliseconds, must be greater than 0
    #[serde(default = "default_pantry_timeout_ms")]
    pub timeout_ms: u64,
}

impl PantryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            locale: Locale::default(),
            embed_nutrition: default_embed_nutrition(),
            pantry: None,
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    30_000
}

fn default_pantry_timeout_ms() -> u64 {
    10_000
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeBuddy/1.0)".to_string()
}

fn default_embed_nutrition() -> bool {
    true
}

/// A zero timeout makes reqwest fail every request, so it is rejected up front.
pub(crate) fn checked_timeout(key: &str, timeout: Duration) -> Result<Duration, ConfigError> {
    if timeout.is_zero() {
        return Err(ConfigError::Message(format!("{key} must be greater than 0")));
    }
    Ok(timeout)
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the source priority.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_BUDDY__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_BUDDY__FETCH__TIMEOUT_MS
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_BUDDY__PANTRY__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_BUDDY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
