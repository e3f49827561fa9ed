use crate::error::WeatherError;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "ATMOS_API_BASE_URL";
pub const GEOLOCATION_URL_ENV: &str = "ATMOS_GEOLOCATION_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// Runtime configuration read from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeather credential; `None` when unset or blank.
    pub api_key: Option<String>,
    pub base_url: String,
    /// IP lookup endpoint; `None` disables geolocation.
    pub geolocation_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            geolocation_url: Some(DEFAULT_GEOLOCATION_URL.to_string()),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let base_url = lookup(BASE_URL_ENV)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Present-but-empty turns geolocation off.
        let geolocation_url = match lookup(GEOLOCATION_URL_ENV) {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(DEFAULT_GEOLOCATION_URL.to_string()),
        };

        Self { api_key, base_url, geolocation_url }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the credential or a configuration error.
    pub fn require_api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::Configuration(API_KEY_ENV))
    }
}
