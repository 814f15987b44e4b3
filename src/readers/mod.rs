pub mod geocoder;
pub mod station_reader;

pub use geocoder::{Address, Geocoder, GeocodingAdapter, NominatimClient};
pub use station_reader::{StationReader, StationSource};
