//! Runtime settings for the advisor.
//!
//! Everything has a working default. `WEATHER_ADVISOR_*` environment variables
//! override individual fields, e.g. `WEATHER_ADVISOR_TIMEOUT_SECONDS=5`.

use anyhow::{bail, Context, Result};
use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_CITY, GEOCODING_API_BASE, OPEN_METEO_API_BASE, REQUEST_TIMEOUT_SECS, USER_AGENT,
};
use crate::locale::Locale;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "WEATHER_ADVISOR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Base URL of the geocoding API, without the `/search` path
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Base URL of the forecast API, without the `/forecast` path
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Language used when a request does not name one
    #[serde(default)]
    pub locale: Locale,
    /// City looked up the first time the panel is shown. Empty disables it.
    #[serde(default = "default_city")]
    pub default_city: String,
}

fn default_geocoding_base_url() -> String {
    GEOCODING_API_BASE.to_string()
}

fn default_forecast_base_url() -> String {
    OPEN_METEO_API_BASE.to_string()
}

fn default_timeout_seconds() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
            locale: Locale::default(),
            default_city: default_city(),
        }
    }
}

impl AdvisorConfig {
    /// Defaults overlaid with any `WEATHER_ADVISOR_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AdvisorConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn normalize(&mut self) {
        for url in [&mut self.geocoding_base_url, &mut self.forecast_base_url] {
            let trimmed = url.trim().trim_end_matches('/').to_string();
            *url = trimmed;
        }
        self.default_city = self.default_city.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("geocoding", &self.geocoding_base_url),
            ("forecast", &self.forecast_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                bail!("The {} base URL must be a valid HTTP or HTTPS URL", name);
            }
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 120 {
            bail!("Request timeout must be between 1 and 120 seconds");
        }

        if self.user_agent.trim().is_empty() {
            bail!("User agent must not be empty");
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
