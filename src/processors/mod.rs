pub mod record_store;
pub mod session;
pub mod spatial_filter;
pub mod station_index;

pub use record_store::RecordStore;
pub use session::{MapSession, SearchOutcome};
pub use spatial_filter::{is_visible, recompute, VisibleStations};
pub use station_index::StationIndex;
