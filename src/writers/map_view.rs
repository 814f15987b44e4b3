use async_trait::async_trait;
use std::fmt;

use crate::models::{Coordinate, Viewport};
use crate::writers::marker_writer::{MarkerDescription, MarkerLayer, UserLocationMarker};

/// Messages surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyQuery,
    NoDataForCity(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyQuery => write!(f, "Enter a city name!"),
            Notice::NoDataForCity(city) => write!(f, "No data found for {}", city),
        }
    }
}

/// The rendering collaborator behind the map
///
/// Calls are synchronous. A view that moves its own viewport reports it to
/// the session through `MapSession::on_viewport_change`.
pub trait MapView: Send + Sync {
    fn bounds(&self) -> Viewport;

    /// Replace every marker in `layer`
    fn render(&self, layer: MarkerLayer, markers: &[MarkerDescription]);

    fn set_view(&self, center: Coordinate, zoom: u8);

    fn show_user_marker(&self, marker: &UserLocationMarker);

    fn remove_user_marker(&self, marker: &UserLocationMarker);

    fn notify(&self, notice: &Notice);
}

/// Device geolocation
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> Option<Coordinate>;
}

/// A provider that always reports the same position
pub struct FixedPosition(pub Coordinate);

#[async_trait]
impl PositionProvider for FixedPosition {
    async fn current_position(&self) -> Option<Coordinate> {
        Some(self.0)
    }
}
