use crate::components::search::FetchPolicy;
use crate::error::{config_error, env_error, SearchResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Default Calendar v3 API root
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Label shown for the caller's primary calendar
pub const DEFAULT_PRIMARY_LABEL: &str = "Primary calendar";

/// Optional file carrying fetch policy overrides
pub const SEARCH_CONFIG_PATH: &str = "config/search.toml";

/// Main configuration structure for the search service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the Calendar API
    pub api_base_url: String,
    /// Bearer token supplied directly, bypassing Redis
    pub access_token: Option<String>,
    /// Redis URL holding the stored OAuth token
    pub redis_url: String,
    /// Redis key of the stored OAuth token
    pub token_redis_key: String,
    /// Timezone used when rendering start times
    pub timezone: String,
    /// Per-request timeout for calendar API calls
    pub request_timeout_secs: u64,
    /// Display name used for the primary calendar
    pub primary_label: String,
    /// Over-fetch policy
    pub fetch_policy: FetchPolicy,
}

/// Shape of `config/search.toml`
#[derive(Debug, Default, Deserialize)]
struct SearchFileConfig {
    #[serde(default)]
    fetch_policy: Option<FetchPolicy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
            redis_url: "redis://127.0.0.1/".to_string(),
            token_redis_key: "google_calendar_token".to_string(),
            timezone: "UTC".to_string(),
            request_timeout_secs: 30,
            primary_label: DEFAULT_PRIMARY_LABEL.to_string(),
            fetch_policy: FetchPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> SearchResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let api_base_url = env::var("GOOGLE_API_BASE_URL").unwrap_or(defaults.api_base_url);
        let access_token = env::var("GOOGLE_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let redis_url = env::var("REDIS_URL").unwrap_or(defaults.redis_url);
        let token_redis_key = env::var("TOKEN_REDIS_KEY").unwrap_or(defaults.token_redis_key);
        let timezone = env::var("TIMEZONE").unwrap_or(defaults.timezone);
        let primary_label = env::var("PRIMARY_CALENDAR_LABEL").unwrap_or(defaults.primary_label);

        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("REQUEST_TIMEOUT_SECS"))?,
            Err(_) => defaults.request_timeout_secs,
        };

        let fetch_policy = match fs::read_to_string(SEARCH_CONFIG_PATH) {
            Ok(content) => Self::parse_search_file(&content)?.unwrap_or(defaults.fetch_policy),
            Err(_) => defaults.fetch_policy,
        };

        let config = Config {
            api_base_url,
            access_token,
            redis_url,
            token_redis_key,
            timezone,
            request_timeout_secs,
            primary_label,
            fetch_policy,
        };
        config.validate()?;

        Ok(config)
    }

    /// Parse fetch policy overrides from TOML content
    pub fn parse_search_file(content: &str) -> SearchResult<Option<FetchPolicy>> {
        let file: SearchFileConfig = toml::from_str(content)?;
        Ok(file.fetch_policy)
    }

    /// Check values that would otherwise fail late
    pub fn validate(&self) -> SearchResult<()> {
        if self.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(config_error(&format!("Unknown timezone: {}", self.timezone)));
        }
        if self.request_timeout_secs == 0 {
            return Err(config_error("REQUEST_TIMEOUT_SECS must be positive"));
        }
        self.fetch_policy.validate()
    }

    /// Parsed display timezone, falling back to UTC
    pub fn display_timezone(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}
