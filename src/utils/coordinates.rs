use crate::error::{AqiMapError, Result};

/// Parse a decimal coordinate that arrived as text
///
/// Surrounding whitespace is ignored. The value must be finite: `"NaN"`,
/// `"inf"` and anything that is not a complete number are rejected.
///
/// # Examples
/// ```
/// use aqi_station_map::utils::parse_coordinate;
///
/// assert!((parse_coordinate(" 28.6 ").unwrap() - 28.6).abs() < 1e-9);
/// assert!(parse_coordinate("abc").is_err());
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    let trimmed = coord_str.trim();

    let value = trimmed.parse::<f64>().map_err(|_| {
        AqiMapError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
    })?;

    ensure_finite(value)
}

/// Reject NaN and infinities
pub fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AqiMapError::InvalidCoordinate(format!(
            "Coordinate must be finite, got: {}",
            value
        )))
    }
}

/// Parse a `south,west,north,east` bounding box
pub fn parse_bounds(bounds: &str) -> Result<(f64, f64, f64, f64)> {
    let parts: Vec<&str> = bounds.split(',').collect();

    if parts.len() != 4 {
        return Err(AqiMapError::InvalidFormat(format!(
            "Invalid bounds: '{}'. Expected format: 'south,west,north,east'",
            bounds
        )));
    }

    let south = parse_coordinate(parts[0])?;
    let west = parse_coordinate(parts[1])?;
    let north = parse_coordinate(parts[2])?;
    let east = parse_coordinate(parts[3])?;

    if south > north || west > east {
        return Err(AqiMapError::InvalidFormat(format!(
            "Bounds corners are inverted: '{}'",
            bounds
        )));
    }

    Ok((south, west, north, east))
}
