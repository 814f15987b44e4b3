use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_BACKEND_URL, DEFAULT_COUNTRY_SCOPE, DEFAULT_GEOCODER_URL,
    DEFAULT_USER_AGENT,
};

/// How overlapping city searches settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPolicy {
    /// Every search applies its result; the one that resolves last wins
    #[default]
    LastResolvedWins,
    /// Only the most recently started search may apply its result
    LatestIssuedWins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    #[validate(url)]
    pub backend_url: String,

    #[validate(url)]
    pub geocoder_url: String,

    #[validate(length(min = 1))]
    pub country_scope: String,

    #[validate(length(min = 1))]
    pub user_agent: String,

    #[serde(default)]
    pub search_policy: SearchPolicy,

    /// No timeout when unset; a hung service then stalls that request
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServiceConfig {
    /// Defaults, then an optional file, then `AQI_MAP_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("geocoder_url", DEFAULT_GEOCODER_URL)?
            .set_default("country_scope", DEFAULT_COUNTRY_SCOPE)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()?;

        let config: ServiceConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Shared HTTP client for the backend and the geocoder
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            country_scope: DEFAULT_COUNTRY_SCOPE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_policy: SearchPolicy::default(),
            request_timeout_secs: None,
        }
    }
}
