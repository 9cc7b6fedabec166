use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::model::SlotKey;

/// Top-level configuration for the page builder and the service menu widget
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the services backend (scheme, host and port)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Session cookie sent with every backend request (`name=value`)
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Content generation defaults
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Service menu widget settings
    #[serde(default)]
    pub widget: WidgetConfig,
}

/// Defaults used when generating service page content
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Backend LLM provider key (e.g. "openai", "anthropic")
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Comma-separated keywords passed to every slot
    #[serde(default)]
    pub keywords: String,
    /// Slots generated when none are requested explicitly
    #[serde(default = "default_slots")]
    pub slots: Vec<SlotKey>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            temperature: default_temperature(),
            keywords: String::new(),
            slots: default_slots(),
        }
    }
}

/// Service menu widget settings
#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    /// How long a fetched service list stays fresh, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Website id used when the host page does not provide one
    #[serde(default)]
    pub website_id: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            website_id: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout: default_timeout(),
            session_cookie: None,
            generation: GenerationConfig::default(),
            widget: WidgetConfig::default(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_slots() -> Vec<SlotKey> {
    SlotKey::ALL.to_vec()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SERVICE_PAGES__ prefix
    /// 2. service-pages.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SERVICE_PAGES__GENERATION__PROVIDER
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the priority order.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("service-pages").required(false))
        // Use double underscore for nested: SERVICE_PAGES__WIDGET__CACHE_TTL_SECS
        .add_source(
            Environment::with_prefix("SERVICE_PAGES")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("generation.slots")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
