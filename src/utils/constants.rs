/// Service endpoints
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_COUNTRY_SCOPE: &str = "India";
pub const DEFAULT_USER_AGENT: &str = concat!("aqi-station-map/", env!("CARGO_PKG_VERSION"));

/// Backend routes
pub const ALL_STATIONS_PATH: &str = "/airquality/all";
pub const CITY_STATIONS_PATH: &str = "/airquality";

/// Geocoder routes
pub const GEOCODER_SEARCH_PATH: &str = "/search";
pub const GEOCODER_REVERSE_PATH: &str = "/reverse";

/// Configuration
pub const CONFIG_ENV_PREFIX: &str = "AQI_MAP";

/// Map defaults (centre of India)
pub const DEFAULT_CENTER_LAT: f64 = 20.59;
pub const DEFAULT_CENTER_LON: f64 = 78.96;
pub const DEFAULT_ZOOM: u8 = 5;
pub const CITY_ZOOM: u8 = 12;

/// Values the backend uses for a missing reading
pub const MISSING_VALUE_MARKERS: [&str; 2] = ["NA", ""];

/// Popup text
pub const NOT_AVAILABLE: &str = "N/A";
pub const USER_LOCATION_LABEL: &str = "Your Location";

/// AQI category upper bounds (inclusive)
pub const AQI_GOOD_MAX: f64 = 50.0;
pub const AQI_SATISFACTORY_MAX: f64 = 100.0;
pub const AQI_MODERATE_MAX: f64 = 200.0;
pub const AQI_POOR_MAX: f64 = 300.0;
pub const AQI_VERY_POOR_MAX: f64 = 400.0;
pub const AQI_SEVERE_MAX: f64 = 500.0;
