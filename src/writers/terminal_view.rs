use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::models::{Coordinate, Viewport};
use crate::writers::map_view::{MapView, Notice};
use crate::writers::marker_writer::{MarkerDescription, MarkerLayer, UserLocationMarker};

/// Screen size the viewport is derived from, in pixels
const SCREEN_WIDTH_PX: f64 = 1280.0;
const SCREEN_HEIGHT_PX: f64 = 720.0;
const TILE_SIZE_PX: f64 = 256.0;

struct TerminalState {
    viewport: Viewport,
    layers: HashMap<MarkerLayer, Vec<MarkerDescription>>,
    user_marker: Option<UserLocationMarker>,
    notices: Vec<Notice>,
}

/// Map view that keeps the latest frame in memory and prints it on demand
pub struct TerminalView {
    state: Mutex<TerminalState>,
    fixed_bounds: bool,
}

impl TerminalView {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                viewport,
                layers: HashMap::new(),
                user_marker: None,
                notices: Vec::new(),
            }),
            fixed_bounds: false,
        }
    }

    /// Ignore recentring requests and keep `viewport` for the whole run
    pub fn with_fixed_bounds(viewport: Viewport) -> Self {
        Self {
            fixed_bounds: true,
            ..Self::new(viewport)
        }
    }

    pub fn markers(&self, layer: MarkerLayer) -> Vec<MarkerDescription> {
        self.lock().layers.get(&layer).cloned().unwrap_or_default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }

    /// Human-readable dump of the current frame
    pub fn frame(&self, show_popups: bool) -> String {
        let state = self.lock();
        let mut out = String::new();

        out.push_str(&format!(
            "Viewport: {} - {}\n",
            state.viewport.south_west, state.viewport.north_east
        ));

        if let Some(marker) = &state.user_marker {
            out.push_str(&format!("{} at {}\n", marker.label, marker.coordinate));
        }

        for (layer, title) in [
            (MarkerLayer::CityStations, "City stations"),
            (MarkerLayer::AllStations, "All stations"),
        ] {
            let markers = state.layers.get(&layer).map(Vec::as_slice).unwrap_or(&[]);
            out.push_str(&format!("\n{} ({}):\n", title, markers.len()));

            for marker in markers {
                let headline = marker.popup.lines().next().unwrap_or_default();
                out.push_str(&format!(
                    "  [{:<6}] {:<12} {} {}\n",
                    marker.color, marker.category, headline, marker.coordinate
                ));
                if show_popups {
                    for line in marker.popup.lines().skip(1) {
                        out.push_str(&format!("             {}\n", line));
                    }
                }
            }
        }

        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Approximate Web Mercator extent of the screen around `center`
pub fn viewport_around(center: Coordinate, zoom: u8) -> Viewport {
    let degrees_per_px = 360.0 / (TILE_SIZE_PX * 2f64.powi(i32::from(zoom)));
    let half_lon = SCREEN_WIDTH_PX * degrees_per_px / 2.0;
    let half_lat = SCREEN_HEIGHT_PX * degrees_per_px * center.latitude.to_radians().cos() / 2.0;

    Viewport {
        south_west: Coordinate {
            latitude: (center.latitude - half_lat).max(-90.0),
            longitude: (center.longitude - half_lon).max(-180.0),
        },
        north_east: Coordinate {
            latitude: (center.latitude + half_lat).min(90.0),
            longitude: (center.longitude + half_lon).min(180.0),
        },
    }
}

impl MapView for TerminalView {
    fn bounds(&self) -> Viewport {
        self.lock().viewport
    }

    fn render(&self, layer: MarkerLayer, markers: &[MarkerDescription]) {
        self.lock().layers.insert(layer, markers.to_vec());
    }

    fn set_view(&self, center: Coordinate, zoom: u8) {
        if !self.fixed_bounds {
            self.lock().viewport = viewport_around(center, zoom);
        }
    }

    fn show_user_marker(&self, marker: &UserLocationMarker) {
        self.lock().user_marker = Some(marker.clone());
    }

    fn remove_user_marker(&self, marker: &UserLocationMarker) {
        let mut state = self.lock();
        if state.user_marker.as_ref().map(|m| m.id) == Some(marker.id) {
            state.user_marker = None;
        }
    }

    fn notify(&self, notice: &Notice) {
        println!("{}", notice);
        self.lock().notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AqiCategory;

    fn marker(popup: &str) -> MarkerDescription {
        MarkerDescription {
            coordinate: Coordinate::new(28.6, 77.2).unwrap(),
            category: AqiCategory::Good,
            color: "green",
            popup: popup.to_string(),
        }
    }

    #[test]
    fn test_viewport_around_contains_center() {
        let center = Coordinate::new(20.59, 78.96).unwrap();
        let viewport = viewport_around(center, 5);

        assert!(viewport.contains(&center));
        // India fits at the default zoom
        assert!(viewport.contains(&Coordinate::new(28.6, 77.2).unwrap()));
        assert!(viewport.contains(&Coordinate::new(13.08, 80.27).unwrap()));
    }

    #[test]
    fn test_city_zoom_is_tight() {
        let center = Coordinate::new(19.07, 72.87).unwrap();
        let viewport = viewport_around(center, 12);

        assert!(viewport.contains(&Coordinate::new(19.08, 72.88).unwrap()));
        assert!(!viewport.contains(&Coordinate::new(18.52, 73.85).unwrap()));
    }

    #[test]
    fn test_fixed_bounds_ignore_set_view() {
        let viewport = Viewport::from_edges(8.0, 68.0, 37.0, 97.5).unwrap();
        let view = TerminalView::with_fixed_bounds(viewport);

        view.set_view(Coordinate::new(19.07, 72.87).unwrap(), 12);
        assert_eq!(view.bounds(), viewport);
    }

    #[test]
    fn test_render_replaces_layer() {
        let view = TerminalView::new(Viewport::world());
        view.render(MarkerLayer::AllStations, &[marker("A"), marker("B")]);
        view.render(MarkerLayer::AllStations, &[marker("C")]);

        assert_eq!(view.markers(MarkerLayer::AllStations).len(), 1);
        assert!(view.markers(MarkerLayer::CityStations).is_empty());
        assert!(view.frame(false).contains("All stations (1)"));
    }

    #[test]
    fn test_remove_only_matching_user_marker() {
        let view = TerminalView::new(Viewport::world());
        let first = UserLocationMarker::new(1, Coordinate::new(19.0, 72.8).unwrap());
        let second = UserLocationMarker::new(2, Coordinate::new(19.1, 72.9).unwrap());

        view.show_user_marker(&second);
        view.remove_user_marker(&first);
        assert!(view.frame(false).contains("Your Location"));

        view.remove_user_marker(&second);
        assert!(!view.frame(false).contains("Your Location"));
    }
}
