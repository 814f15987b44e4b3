use serde::Serialize;
use std::fmt::Write;

use crate::models::{classify, AqiCategory, Coordinate, StationRecord};
use crate::utils::constants::{NOT_AVAILABLE, USER_LOCATION_LABEL};

/// Everything a map needs to draw one station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescription {
    pub coordinate: Coordinate,
    pub category: AqiCategory,
    pub color: &'static str,
    pub popup: String,
}

/// The two marker groups drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MarkerLayer {
    AllStations,
    CityStations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLocationMarker {
    pub id: u64,
    pub coordinate: Coordinate,
    pub label: &'static str,
}

impl UserLocationMarker {
    pub fn new(id: u64, coordinate: Coordinate) -> Self {
        Self {
            id,
            coordinate,
            label: USER_LOCATION_LABEL,
        }
    }
}

/// Map a station onto its marker
///
/// The average is truncated to an integer before classification, matching
/// the value printed as `AQI (avg)` in the popup.
pub fn describe(record: &StationRecord) -> MarkerDescription {
    let aqi = record.pollutant_avg.map(f64::trunc);
    let class = classify(aqi);

    MarkerDescription {
        coordinate: record.coordinate,
        category: class.category,
        color: class.color,
        popup: popup_text(record, aqi),
    }
}

pub fn describe_all(records: &[StationRecord]) -> Vec<MarkerDescription> {
    records.iter().map(describe).collect()
}

fn popup_text(record: &StationRecord, aqi: Option<f64>) -> String {
    let mut popup = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(
        popup,
        "{} ({})",
        record.city,
        text_or_na(record.state.as_deref())
    );
    let _ = writeln!(popup, "Station: {}", text_or_na(record.station.as_deref()));
    let _ = writeln!(
        popup,
        "Pollutant: {}",
        text_or_na(record.pollutant_id.as_deref())
    );
    let _ = writeln!(popup, "AQI (avg): {}", reading_or_na(aqi));
    let _ = writeln!(popup, "Min: {}", reading_or_na(record.pollutant_min));
    let _ = writeln!(popup, "Max: {}", reading_or_na(record.pollutant_max));
    let _ = write!(
        popup,
        "Last Update: {}",
        text_or_na(record.last_update.as_deref())
    );

    popup
}

fn text_or_na(value: Option<&str>) -> &str {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => NOT_AVAILABLE,
    }
}

fn reading_or_na(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
