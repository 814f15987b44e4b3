pub mod aqi;
pub mod station;
pub mod viewport;

pub use aqi::{classify, AqiCategory, AqiClass, LegendEntry};
pub use station::{RawRecord, RawText, RawValue, RecordsResponse, StationRecord};
pub use viewport::{Coordinate, PollutantSelector, Viewport};
