use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AqiMapError, Result};
use crate::utils::coordinates::{ensure_finite, parse_bounds};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite components
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude: ensure_finite(latitude)?,
            longitude: ensure_finite(longitude)?,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Visible map rectangle, south-west and north-east corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Viewport {
    pub fn new(south_west: Coordinate, north_east: Coordinate) -> Result<Self> {
        if south_west.latitude > north_east.latitude
            || south_west.longitude > north_east.longitude
        {
            return Err(AqiMapError::InvalidCoordinate(format!(
                "Viewport corners are inverted: south-west {} north-east {}",
                south_west, north_east
            )));
        }

        Ok(Self {
            south_west,
            north_east,
        })
    }

    pub fn from_edges(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        Self::new(Coordinate::new(south, west)?, Coordinate::new(north, east)?)
    }

    /// The whole globe
    pub fn world() -> Self {
        Self {
            south_west: Coordinate {
                latitude: -90.0,
                longitude: -180.0,
            },
            north_east: Coordinate {
                latitude: 90.0,
                longitude: 180.0,
            },
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.latitude >= self.south_west.latitude
            && coordinate.latitude <= self.north_east.latitude
            && coordinate.longitude >= self.south_west.longitude
            && coordinate.longitude <= self.north_east.longitude
    }
}

impl std::str::FromStr for Viewport {
    type Err = AqiMapError;

    fn from_str(s: &str) -> Result<Self> {
        let (south, west, north, east) = parse_bounds(s)?;
        Self::from_edges(south, west, north, east)
    }
}

/// Which pollutant the map shows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PollutantSelector {
    #[default]
    All,
    Pollutant(String),
}

impl PollutantSelector {
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => PollutantSelector::All,
            code => PollutantSelector::Pollutant(code.to_string()),
        }
    }

    /// Exact, case-sensitive code comparison
    pub fn matches(&self, pollutant_id: Option<&str>) -> bool {
        match self {
            PollutantSelector::All => true,
            PollutantSelector::Pollutant(code) => pollutant_id == Some(code.as_str()),
        }
    }
}

impl fmt::Display for PollutantSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollutantSelector::All => write!(f, "all"),
            PollutantSelector::Pollutant(code) => write!(f, "{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn india() -> Viewport {
        Viewport::from_edges(8.0, 68.0, 37.0, 97.5).unwrap()
    }

    #[test]
    fn test_contains_inclusive_edges() {
        let viewport = india();

        assert!(viewport.contains(&Coordinate::new(28.6, 77.2).unwrap()));
        assert!(viewport.contains(&Coordinate::new(8.0, 68.0).unwrap()));
        assert!(viewport.contains(&Coordinate::new(37.0, 97.5).unwrap()));
        assert!(viewport.contains(&Coordinate::new(8.0, 97.5).unwrap()));
    }

    #[test]
    fn test_one_ulp_outside_is_excluded() {
        let viewport = india();

        let below_south = f64::from_bits(8.0_f64.to_bits() - 1);
        let above_north = f64::from_bits(37.0_f64.to_bits() + 1);
        let west_of_west = f64::from_bits(68.0_f64.to_bits() - 1);
        let east_of_east = f64::from_bits(97.5_f64.to_bits() + 1);

        assert!(!viewport.contains(&Coordinate::new(below_south, 77.0).unwrap()));
        assert!(!viewport.contains(&Coordinate::new(above_north, 77.0).unwrap()));
        assert!(!viewport.contains(&Coordinate::new(20.0, west_of_west).unwrap()));
        assert!(!viewport.contains(&Coordinate::new(20.0, east_of_east).unwrap()));
    }

    #[test]
    fn test_inverted_corners_rejected() {
        assert!(Viewport::from_edges(37.0, 68.0, 8.0, 97.5).is_err());
        assert!(Viewport::from_edges(8.0, 97.5, 37.0, 68.0).is_err());
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        assert!(Coordinate::new(f64::NAN, 77.0).is_err());
        assert!(Coordinate::new(28.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_viewport_from_str() {
        let viewport: Viewport = "8.0,68.0,37.0,97.5".parse().unwrap();
        assert_eq!(viewport, india());
    }

    #[test]
    fn test_pollutant_selector() {
        assert_eq!(PollutantSelector::parse("all"), PollutantSelector::All);
        assert_eq!(
            PollutantSelector::parse("PM2.5"),
            PollutantSelector::Pollutant("PM2.5".to_string())
        );

        let pm25 = PollutantSelector::parse("PM2.5");
        assert!(pm25.matches(Some("PM2.5")));
        assert!(!pm25.matches(Some("pm2.5")));
        assert!(!pm25.matches(None));
        assert!(PollutantSelector::All.matches(None));
    }
}
