use std::collections::{BTreeMap, BTreeSet};

use crate::models::StationRecord;

/// States, cities and pollutants present in a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationIndex {
    pub states: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub pollutants: BTreeSet<String>,
    pub state_cities: BTreeMap<String, BTreeSet<String>>,
}

impl StationIndex {
    pub fn from_records(records: &[StationRecord]) -> Self {
        let mut index = Self::default();

        for record in records {
            if !record.city.is_empty() {
                index.cities.insert(record.city.clone());
            }

            if let Some(pollutant) = record.pollutant_id.as_ref() {
                index.pollutants.insert(pollutant.clone());
            }

            if let Some(state) = record.state.as_ref() {
                index.states.insert(state.clone());
                let cities = index.state_cities.entry(state.clone()).or_default();
                if !record.city.is_empty() {
                    cities.insert(record.city.clone());
                }
            }
        }

        index
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Station Summary ===\n");
        summary.push_str(&format!("States: {}\n", self.states.len()));
        summary.push_str(&format!("Cities: {}\n", self.cities.len()));
        summary.push_str(&format!(
            "Pollutants: {}\n",
            self.pollutants
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        ));

        if !self.state_cities.is_empty() {
            summary.push_str("\nState -> Cities:\n");
            for (state, cities) in &self.state_cities {
                summary.push_str(&format!(
                    "  {} -> {}\n",
                    state,
                    cities.iter().cloned().collect::<Vec<_>>().join(", ")
                ));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn record(city: &str, state: &str, pollutant: &str) -> StationRecord {
        StationRecord::new(city, Coordinate::new(20.0, 78.0).unwrap())
            .with_state(state)
            .with_pollutant(pollutant, Some(10.0))
    }

    #[test]
    fn test_index_groups_cities_by_state() {
        let records = vec![
            record("Pune", "Maharashtra", "PM10"),
            record("Mumbai", "Maharashtra", "PM2.5"),
            record("Pune", "Maharashtra", "NO2"),
            record("Delhi", "Delhi", "PM2.5"),
        ];

        let index = StationIndex::from_records(&records);

        assert_eq!(index.states.len(), 2);
        assert_eq!(index.cities.len(), 3);
        assert_eq!(
            index.pollutants.iter().cloned().collect::<Vec<_>>(),
            vec!["NO2", "PM10", "PM2.5"]
        );
        assert_eq!(
            index.state_cities["Maharashtra"]
                .iter()
                .cloned()
                .collect::<Vec<_>>(),
            vec!["Mumbai", "Pune"]
        );
    }

    #[test]
    fn test_summary_lists_states() {
        let index = StationIndex::from_records(&[record("Delhi", "Delhi", "PM2.5")]);
        let summary = index.summary();

        assert!(summary.contains("States: 1"));
        assert!(summary.contains("Delhi -> Delhi"));
        assert!(summary.contains("Pollutants: PM2.5"));
    }

    #[test]
    fn test_empty_index() {
        let index = StationIndex::from_records(&[]);
        assert_eq!(index, StationIndex::default());
    }
}
