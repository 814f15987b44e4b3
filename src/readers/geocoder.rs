//! Place-name resolution against a Nominatim-compatible geocoder.
//!
//! The raw service sits behind [`Geocoder`]; [`GeocodingAdapter`] layers the
//! fallback rules on top so a failed lookup never stops a search.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{AqiMapError, Result};
use crate::models::Coordinate;
use crate::utils::constants::{GEOCODER_REVERSE_PATH, GEOCODER_SEARCH_PATH};
use crate::utils::text::capitalize_words;

/// Administrative names from a geocoder hit
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
}

impl Address {
    /// First non-empty of city, town, village
    pub fn locality(&self) -> Option<&str> {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .filter_map(|name| name.as_deref())
            .find(|name| !name.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    address: Option<Address>,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for a free-text query
    async fn search(&self, query: &str) -> Result<Option<Address>>;

    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<Address>>;
}

/// HTTP client for Nominatim
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(config.http_client()?, &config.geocoder_url))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, ?query, "Geocoder request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AqiMapError::UnexpectedStatus {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Option<Address>> {
        let places: Vec<Place> = self
            .get_json(
                GEOCODER_SEARCH_PATH,
                &[
                    ("q", query.to_string()),
                    ("format", "json".to_string()),
                    ("addressdetails", "1".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(places.into_iter().next().and_then(|place| place.address))
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<Address>> {
        let place: Place = self
            .get_json(
                GEOCODER_REVERSE_PATH,
                &[
                    ("lat", coordinate.latitude.to_string()),
                    ("lon", coordinate.longitude.to_string()),
                    ("format", "json".to_string()),
                    ("addressdetails", "1".to_string()),
                ],
            )
            .await?;

        Ok(place.address)
    }
}

/// City-name normalization with graceful degradation
#[derive(Clone)]
pub struct GeocodingAdapter {
    geocoder: Arc<dyn Geocoder>,
    country_scope: String,
}

impl GeocodingAdapter {
    pub fn new(geocoder: Arc<dyn Geocoder>, country_scope: &str) -> Self {
        Self {
            geocoder,
            country_scope: country_scope.to_string(),
        }
    }

    /// Canonical city name for what the user typed
    ///
    /// Falls back to the capitalized input whenever the geocoder errors or has
    /// no locality for it.
    pub async fn normalize_city_name(&self, free_text: &str) -> String {
        let local = capitalize_words(free_text);
        let query = format!("{},{}", local, self.country_scope);

        match self.geocoder.search(&query).await {
            Ok(Some(address)) => match address.locality() {
                Some(name) => {
                    debug!(input = free_text, resolved = name, "Normalized city name");
                    name.to_string()
                }
                None => local,
            },
            Ok(None) => local,
            Err(e) => {
                warn!(error = %e, input = free_text, "Geocoding error");
                local
            }
        }
    }

    /// City at a position, `None` if the service fails or knows no locality
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Option<String> {
        let coordinate = Coordinate::new(lat, lon).ok()?;

        match self.geocoder.reverse(coordinate).await {
            Ok(address) => address.and_then(|a| a.locality().map(str::to_string)),
            Err(e) => {
                warn!(error = %e, %coordinate, "Reverse geocoding error");
                None
            }
        }
    }
}
