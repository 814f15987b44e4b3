pub mod map_view;
pub mod marker_writer;
pub mod terminal_view;

pub use map_view::{FixedPosition, MapView, Notice, PositionProvider};
pub use marker_writer::{describe, describe_all, MarkerDescription, MarkerLayer, UserLocationMarker};
pub use terminal_view::{viewport_around, TerminalView};
