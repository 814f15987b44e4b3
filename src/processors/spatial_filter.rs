use crate::models::{PollutantSelector, StationRecord, Viewport};

/// Visible subsets of both collections after one filter pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleStations {
    pub all: Vec<StationRecord>,
    pub city: Vec<StationRecord>,
}

impl VisibleStations {
    pub fn total(&self) -> usize {
        self.all.len() + self.city.len()
    }
}

/// Whether a single station is on screen for the current selection
///
/// Coordinates are validated at ingest, so only the pollutant and the
/// viewport are checked here.
pub fn is_visible(
    record: &StationRecord,
    viewport: &Viewport,
    pollutant: &PollutantSelector,
) -> bool {
    pollutant.matches(record.pollutant_id.as_deref()) && viewport.contains(&record.coordinate)
}

/// Recompute what is visible in both collections
///
/// Pure: the inputs are only read and the result depends on nothing else.
/// Input order is preserved.
pub fn recompute(
    all: &[StationRecord],
    city: &[StationRecord],
    viewport: &Viewport,
    pollutant: &PollutantSelector,
) -> VisibleStations {
    VisibleStations {
        all: filter_collection(all, viewport, pollutant),
        city: filter_collection(city, viewport, pollutant),
    }
}

fn filter_collection(
    records: &[StationRecord],
    viewport: &Viewport,
    pollutant: &PollutantSelector,
) -> Vec<StationRecord> {
    records
        .iter()
        .filter(|record| is_visible(record, viewport, pollutant))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{classify, AqiCategory, Coordinate};
    use pretty_assertions::assert_eq;

    fn station(city: &str, pollutant: &str, avg: Option<f64>, lat: f64, lon: f64) -> StationRecord {
        StationRecord::new(city, Coordinate::new(lat, lon).unwrap()).with_pollutant(pollutant, avg)
    }

    fn sample() -> (Vec<StationRecord>, Vec<StationRecord>) {
        let all = vec![
            station("Delhi", "PM2.5", Some(55.0), 28.6, 77.2),
            station("Delhi", "PM10", Some(180.0), 28.65, 77.25),
            station("Chennai", "PM2.5", Some(30.0), 13.08, 80.27),
            station("Kolkata", "NO2", None, 22.57, 88.36),
        ];
        let city = vec![
            station("Delhi", "PM2.5", Some(0.0), 28.61, 77.21),
            station("Delhi", "CO", Some(12.0), 28.62, 77.22),
        ];
        (all, city)
    }

    fn north_india() -> Viewport {
        Viewport::from_edges(24.0, 70.0, 32.0, 80.0).unwrap()
    }

    #[test]
    fn test_all_pollutants_in_viewport() {
        let (all, city) = sample();
        let visible = recompute(&all, &city, &north_india(), &PollutantSelector::All);

        assert_eq!(visible.all.len(), 2);
        assert_eq!(visible.city.len(), 2);
        assert_eq!(visible.total(), 4);
    }

    #[test]
    fn test_pollutant_selection() {
        let (all, city) = sample();
        let pm25 = PollutantSelector::parse("PM2.5");
        let visible = recompute(&all, &city, &Viewport::world(), &pm25);

        assert_eq!(visible.all.len(), 2);
        assert!(visible
            .all
            .iter()
            .all(|r| r.pollutant_id.as_deref() == Some("PM2.5")));
        assert_eq!(visible.city.len(), 1);
    }

    #[test]
    fn test_zero_reading_survives_and_is_good() {
        let (all, city) = sample();
        let visible = recompute(&all, &city, &north_india(), &PollutantSelector::parse("PM2.5"));

        let zero = &visible.city[0];
        assert_eq!(zero.pollutant_avg, Some(0.0));
        assert_eq!(classify(zero.pollutant_avg).category, AqiCategory::Good);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (all, city) = sample();
        let viewport = north_india();
        let first = recompute(&all, &city, &viewport, &PollutantSelector::All);
        let second = recompute(&all, &city, &viewport, &PollutantSelector::All);

        assert_eq!(first, second);
    }

    #[test]
    fn test_station_on_edge_is_visible() {
        let edge = station("Edge", "PM10", Some(10.0), 24.0, 80.0);
        let viewport = north_india();
        assert!(is_visible(&edge, &viewport, &PollutantSelector::All));

        let outside = station(
            "Outside",
            "PM10",
            Some(10.0),
            f64::from_bits(24.0_f64.to_bits() - 1),
            75.0,
        );
        assert!(!is_visible(&outside, &viewport, &PollutantSelector::All));
    }

    #[test]
    fn test_inputs_untouched() {
        let (all, city) = sample();
        let all_before = all.clone();
        let city_before = city.clone();

        let _ = recompute(&all, &city, &north_india(), &PollutantSelector::parse("CO"));

        assert_eq!(all, all_before);
        assert_eq!(city, city_before);
    }
}
