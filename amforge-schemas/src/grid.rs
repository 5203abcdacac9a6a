use serde::{Deserialize, Serialize};

/// Emission intensity of a country's electricity generation mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridProfile {
    pub country: String,
    /// kg CO2e per kWh.
    pub emission_factor: f64,
}

impl GridProfile {
    pub fn new(country: impl Into<String>, emission_factor: f64) -> Self {
        Self {
            country: country.into(),
            emission_factor,
        }
    }
}

/// Country used for the lifecycle breakdown when none is chosen.
pub const BASELINE_COUNTRY: &str = "Germany";

/// Reference grid-mix catalog, in display order.
pub fn reference_catalog() -> Vec<GridProfile> {
    [
        ("Germany", 0.4),
        ("USA", 0.25),
        ("China", 0.75),
        ("Japan", 0.43),
        ("France", 0.07),
        ("UK", 0.27),
        ("India", 0.71),
        ("Brazil", 0.08),
        ("Australia", 0.58),
        ("Canada", 0.16),
    ]
    .into_iter()
    .map(|(country, factor)| GridProfile::new(country, factor))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_has_ten_non_negative_entries() {
        let catalog = reference_catalog();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.iter().all(|g| g.emission_factor >= 0.0));
        assert_eq!(catalog[0], GridProfile::new(BASELINE_COUNTRY, 0.4));
        assert_eq!(catalog[9].country, "Canada");
    }
}
