use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{AqiMapError, Result};
use crate::models::{RawRecord, RawText, RecordsResponse};
use crate::utils::constants::{ALL_STATIONS_PATH, CITY_STATIONS_PATH};

/// Where station records come from
///
/// Failures are absorbed: an implementation logs the problem and returns an
/// empty list, so callers cannot tell "no stations" from "request failed".
#[async_trait]
pub trait StationSource: Send + Sync {
    async fn fetch_all(&self) -> Vec<RawRecord>;
    async fn fetch_city(&self, city: &str) -> Vec<RawRecord>;
}

/// HTTP client for the air-quality backend
pub struct StationReader {
    client: Client,
    base_url: String,
}

impl StationReader {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(config.http_client()?, &config.backend_url))
    }

    pub fn all_stations_url(&self) -> String {
        format!("{}{}", self.base_url, ALL_STATIONS_PATH)
    }

    pub fn city_stations_url(&self) -> String {
        format!("{}{}", self.base_url, CITY_STATIONS_PATH)
    }

    /// One GET, decoded into the `records` envelope
    async fn request_records(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<RawRecord>> {
        debug!(url, ?query, "Requesting station records");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AqiMapError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: RecordsResponse = serde_json::from_str(&body)?;

        if let Some(message) = parsed.error.and_then(RawText::into_text) {
            warn!(url, message = %message, "Backend reported an error");
        }

        debug!(url, count = parsed.records.len(), "Received station records");
        Ok(parsed.records)
    }
}

#[async_trait]
impl StationSource for StationReader {
    async fn fetch_all(&self) -> Vec<RawRecord> {
        let url = self.all_stations_url();
        match self.request_records(&url, &[]).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Error fetching all stations");
                Vec::new()
            }
        }
    }

    async fn fetch_city(&self, city: &str) -> Vec<RawRecord> {
        let url = self.city_stations_url();
        match self.request_records(&url, &[("city", city)]).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, city, "Error fetching city stations");
                Vec::new()
            }
        }
    }
}
