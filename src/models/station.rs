use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{AqiMapError, Result};
use crate::models::viewport::Coordinate;
use crate::utils::constants::MISSING_VALUE_MARKERS;
use crate::utils::coordinates::{ensure_finite, parse_coordinate};

/// A numeric field as the backend sends it: a number, a numeric string, or junk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Concentration reading; `"NA"`, empty and unparseable values are absent
    pub fn as_reading(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Number(_) => None,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if MISSING_VALUE_MARKERS.contains(&trimmed) {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            RawValue::Other(_) => None,
        }
    }

    pub fn as_coordinate(&self) -> Result<f64> {
        match self {
            RawValue::Number(n) => ensure_finite(*n),
            RawValue::Text(s) => parse_coordinate(s),
            RawValue::Other(v) => Err(AqiMapError::InvalidCoordinate(format!(
                "Unsupported coordinate value: {}",
                v
            ))),
        }
    }
}

/// A text field as the backend sends it
///
/// Numbers and booleans keep their JSON spelling; other non-strings are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Other(serde_json::Value),
}

impl RawText {
    pub fn into_text(self) -> Option<String> {
        match self {
            RawText::Text(s) => Some(s),
            RawText::Other(serde_json::Value::Number(n)) => Some(n.to_string()),
            RawText::Other(serde_json::Value::Bool(b)) => Some(b.to_string()),
            RawText::Other(_) => None,
        }
    }
}

/// One backend record before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub city: Option<RawText>,
    #[serde(default)]
    pub state: Option<RawText>,
    #[serde(default)]
    pub station: Option<RawText>,
    #[serde(default)]
    pub pollutant_id: Option<RawText>,
    #[serde(default, alias = "avg_value")]
    pub pollutant_avg: Option<RawValue>,
    #[serde(default, alias = "min_value")]
    pub pollutant_min: Option<RawValue>,
    #[serde(default, alias = "max_value")]
    pub pollutant_max: Option<RawValue>,
    #[serde(default)]
    pub latitude: Option<RawValue>,
    #[serde(default)]
    pub longitude: Option<RawValue>,
    #[serde(default)]
    pub last_update: Option<RawText>,
}

/// Backend response envelope; a missing `records` array means no stations
///
/// Elements that are not records at all are skipped one by one, so a single
/// bad entry never costs the rest of the batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsResponse {
    #[serde(default, deserialize_with = "skip_undecodable")]
    pub records: Vec<RawRecord>,
    #[serde(default)]
    pub error: Option<RawText>,
}

fn skip_undecodable<'de, D>(deserializer: D) -> std::result::Result<Vec<RawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect())
}

/// A station reading with a usable position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub city: String,
    pub state: Option<String>,
    pub station: Option<String>,
    pub pollutant_id: Option<String>,
    pub pollutant_avg: Option<f64>,
    pub pollutant_min: Option<f64>,
    pub pollutant_max: Option<f64>,
    pub coordinate: Coordinate,
    /// Shown as received, never parsed
    pub last_update: Option<String>,
}

impl StationRecord {
    pub fn new(city: &str, coordinate: Coordinate) -> Self {
        Self {
            city: city.to_string(),
            state: None,
            station: None,
            pollutant_id: None,
            pollutant_avg: None,
            pollutant_min: None,
            pollutant_max: None,
            coordinate,
            last_update: None,
        }
    }

    pub fn with_pollutant(mut self, pollutant_id: &str, avg: Option<f64>) -> Self {
        self.pollutant_id = Some(pollutant_id.to_string());
        self.pollutant_avg = avg;
        self
    }

    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    /// Validate a raw record, `None` when it has no usable position
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        Self::try_from(raw).ok()
    }
}

impl TryFrom<RawRecord> for StationRecord {
    type Error = AqiMapError;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let latitude = raw
            .latitude
            .as_ref()
            .ok_or_else(|| AqiMapError::InvalidCoordinate("Missing latitude".to_string()))?
            .as_coordinate()?;
        let longitude = raw
            .longitude
            .as_ref()
            .ok_or_else(|| AqiMapError::InvalidCoordinate("Missing longitude".to_string()))?
            .as_coordinate()?;

        Ok(Self {
            city: raw.city.and_then(RawText::into_text).unwrap_or_default(),
            state: raw.state.and_then(RawText::into_text),
            station: raw.station.and_then(RawText::into_text),
            pollutant_id: raw.pollutant_id.and_then(RawText::into_text),
            pollutant_avg: raw.pollutant_avg.as_ref().and_then(RawValue::as_reading),
            pollutant_min: raw.pollutant_min.as_ref().and_then(RawValue::as_reading),
            pollutant_max: raw.pollutant_max.as_ref().and_then(RawValue::as_reading),
            coordinate: Coordinate::new(latitude, longitude)?,
            last_update: raw.last_update.and_then(RawText::into_text),
        })
    }
}
