use crate::error::AmforgeError;
use amforge_schemas::grid::GridProfile;
use std::collections::HashSet;

/// Number of catalog entries compared when the user picks none.
pub const DEFAULT_SELECTION_LEN: usize = 3;

/// Rejects negative factors and repeated country names.
pub fn validate_catalog(catalog: &[GridProfile]) -> Result<(), AmforgeError> {
    let mut seen = HashSet::new();
    for grid in catalog {
        if grid.emission_factor.is_nan() || grid.emission_factor < 0.0 {
            return Err(AmforgeError::NegativeGridFactor(
                grid.country.clone(),
                grid.emission_factor,
            ));
        }
        if !seen.insert(grid.country.to_lowercase()) {
            return Err(AmforgeError::DuplicateCountry(grid.country.clone()));
        }
    }
    Ok(())
}

/// Looks up a country by name, ignoring ASCII case.
pub fn find_grid<'a>(catalog: &'a [GridProfile], country: &str) -> Result<&'a GridProfile, AmforgeError> {
    catalog
        .iter()
        .find(|g| g.country.eq_ignore_ascii_case(country))
        .ok_or_else(|| AmforgeError::CountryNotFound(country.to_string()))
}

/// Resolves the named countries in the order they were named.
///
/// An empty list resolves to an empty selection.
pub fn select_grids<S: AsRef<str>>(
    catalog: &[GridProfile],
    countries: &[S],
) -> Result<Vec<GridProfile>, AmforgeError> {
    countries
        .iter()
        .map(|c| find_grid(catalog, c.as_ref()).cloned())
        .collect()
}

/// The leading catalog entries, pre-selected for multi-country comparison.
pub fn default_selection(catalog: &[GridProfile]) -> Vec<GridProfile> {
    catalog.iter().take(DEFAULT_SELECTION_LEN).cloned().collect()
}
