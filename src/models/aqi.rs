use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{
    AQI_GOOD_MAX, AQI_MODERATE_MAX, AQI_POOR_MAX, AQI_SATISFACTORY_MAX, AQI_SEVERE_MAX,
    AQI_VERY_POOR_MAX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
    Unknown,
}

/// Category and display colour for one reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiClass {
    pub category: AqiCategory,
    pub color: &'static str,
}

/// One row of the map legend
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub category: AqiCategory,
    pub label: &'static str,
    pub color: &'static str,
    pub limit: Option<f64>,
}

impl LegendEntry {
    /// Range text such as `0–50`, empty for the Unknown row
    pub fn range_text(&self) -> String {
        match self.limit {
            Some(limit) => format!("0–{}", limit),
            None => String::new(),
        }
    }
}

impl AqiCategory {
    /// Ordered from best to worst, Unknown last
    pub const ALL: [AqiCategory; 7] = [
        AqiCategory::Good,
        AqiCategory::Satisfactory,
        AqiCategory::Moderate,
        AqiCategory::Poor,
        AqiCategory::VeryPoor,
        AqiCategory::Severe,
        AqiCategory::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
            AqiCategory::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "green",
            AqiCategory::Satisfactory => "yellow",
            AqiCategory::Moderate => "orange",
            AqiCategory::Poor => "red",
            AqiCategory::VeryPoor => "purple",
            AqiCategory::Severe => "black",
            AqiCategory::Unknown => "gray",
        }
    }

    /// Legend upper bound. Severe is open-ended above 400 but the legend caps it at 500.
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            AqiCategory::Good => Some(AQI_GOOD_MAX),
            AqiCategory::Satisfactory => Some(AQI_SATISFACTORY_MAX),
            AqiCategory::Moderate => Some(AQI_MODERATE_MAX),
            AqiCategory::Poor => Some(AQI_POOR_MAX),
            AqiCategory::VeryPoor => Some(AQI_VERY_POOR_MAX),
            AqiCategory::Severe => Some(AQI_SEVERE_MAX),
            AqiCategory::Unknown => None,
        }
    }

    pub fn legend() -> Vec<LegendEntry> {
        Self::ALL
            .iter()
            .map(|category| LegendEntry {
                category: *category,
                label: category.label(),
                color: category.color(),
                limit: category.upper_bound(),
            })
            .collect()
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Map a pollutant average onto the AQI ladder
///
/// Bounds are inclusive and checked in ascending order. A missing or NaN
/// value is Unknown; zero is a real reading and lands in Good.
pub fn classify(value: Option<f64>) -> AqiClass {
    let category = match value {
        None => AqiCategory::Unknown,
        Some(v) if v.is_nan() => AqiCategory::Unknown,
        Some(v) if v <= AQI_GOOD_MAX => AqiCategory::Good,
        Some(v) if v <= AQI_SATISFACTORY_MAX => AqiCategory::Satisfactory,
        Some(v) if v <= AQI_MODERATE_MAX => AqiCategory::Moderate,
        Some(v) if v <= AQI_POOR_MAX => AqiCategory::Poor,
        Some(v) if v <= AQI_VERY_POOR_MAX => AqiCategory::VeryPoor,
        Some(_) => AqiCategory::Severe,
    };

    AqiClass {
        category,
        color: category.color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_ladder() {
        assert_eq!(classify(Some(0.0)).category, AqiCategory::Good);
        assert_eq!(classify(Some(50.0)).category, AqiCategory::Good);
        assert_eq!(classify(Some(51.0)).category, AqiCategory::Satisfactory);
        assert_eq!(classify(Some(100.0)).category, AqiCategory::Satisfactory);
        assert_eq!(classify(Some(150.0)).category, AqiCategory::Moderate);
        assert_eq!(classify(Some(300.0)).category, AqiCategory::Poor);
        assert_eq!(classify(Some(400.0)).category, AqiCategory::VeryPoor);
        assert_eq!(classify(Some(401.0)).category, AqiCategory::Severe);
        assert_eq!(classify(Some(9000.0)).category, AqiCategory::Severe);
    }

    #[test]
    fn test_fractional_values_between_bounds() {
        assert_eq!(classify(Some(50.5)).category, AqiCategory::Satisfactory);
        assert_eq!(classify(Some(200.01)).category, AqiCategory::Poor);
    }

    #[test]
    fn test_missing_values_are_unknown() {
        let class = classify(None);
        assert_eq!(class.category, AqiCategory::Unknown);
        assert_eq!(class.color, "gray");

        assert_eq!(classify(Some(f64::NAN)).category, AqiCategory::Unknown);
    }

    #[test]
    fn test_colors_follow_category() {
        assert_eq!(classify(Some(55.0)).color, "yellow");
        assert_eq!(classify(Some(10.0)).color, "green");
        assert_eq!(classify(Some(450.0)).color, "black");
    }

    #[test]
    fn test_negative_values_classify_as_good() {
        assert_eq!(classify(Some(-1.0)).category, AqiCategory::Good);
    }

    #[test]
    fn test_legend() {
        let legend = AqiCategory::legend();

        assert_eq!(legend.len(), 7);
        assert_eq!(legend[0].label, "Good");
        assert_eq!(legend[0].range_text(), "0–50");
        assert_eq!(legend[5].label, "Severe");
        assert_eq!(legend[5].range_text(), "0–500");
        assert_eq!(legend[6].category, AqiCategory::Unknown);
        assert_eq!(legend[6].range_text(), "");
    }
}
