use crate::error::AmforgeError;
use amforge_schemas::parameters::{ParameterKey, ProcessParameters};
use tracing::debug;

/// A fluent builder for a validated `ProcessParameters` value.
///
/// Each edit cycle starts from a base record (the reference defaults or a
/// loaded file), applies overrides, and produces a fresh immutable value.
/// The emission formulas never check their inputs, so this is where negative
/// magnitudes and out-of-range fractions are rejected.
#[derive(Debug, Default)]
pub struct ParametersBuilder {
    base: ProcessParameters,
    overrides: Vec<(ParameterKey, f64)>,
    material_type: Option<String>,
}

impl ParametersBuilder {
    /// Creates a builder seeded with the reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the base record that overrides are applied to.
    pub fn with_parameters(mut self, base: ProcessParameters) -> Self {
        self.base = base;
        self
    }

    pub fn with_material_type(mut self, material_type: impl Into<String>) -> Self {
        self.material_type = Some(material_type.into());
        self
    }

    /// Overrides a single numeric field. Later overrides of the same key win.
    pub fn set(mut self, key: ParameterKey, value: f64) -> Self {
        self.overrides.push((key, value));
        self
    }

    /// Parses a `key=value` assignment, as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` for a key that names no field and
    /// `UnparsableValue` when the value is not a number.
    pub fn assign(self, assignment: &str) -> Result<Self, AmforgeError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| AmforgeError::UnparsableValue {
                key: assignment.trim().to_string(),
                value: String::new(),
            })?;
        let key = key.trim();
        let value = value.trim();

        if key == "material_type" {
            return Ok(self.with_material_type(value));
        }

        let param = ParameterKey::from_key(key)
            .ok_or_else(|| AmforgeError::UnknownParameter(key.to_string()))?;
        let parsed: f64 = value.parse().map_err(|_| AmforgeError::UnparsableValue {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(self.set(param, parsed))
    }

    /// Consumes the builder and returns the validated parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for the first field that is negative or not
    /// a finite number, or an efficiency loss fraction above 1.
    pub fn build(self) -> Result<ProcessParameters, AmforgeError> {
        let mut params = self
            .overrides
            .into_iter()
            .fold(self.base, |params, (key, value)| params.with_value(key, value));
        if let Some(material_type) = self.material_type {
            params.material_type = material_type;
        }
        validate(&params)?;
        debug!(material_type = %params.material_type, "built process parameters");
        Ok(params)
    }
}

/// Checks the documented preconditions of the emission model.
pub fn validate(params: &ProcessParameters) -> Result<(), AmforgeError> {
    for key in ParameterKey::ALL {
        let value = params.value(key);
        if !value.is_finite() || value < 0.0 {
            return Err(AmforgeError::InvalidParameter {
                key: key.key(),
                value,
                requirement: "a finite non-negative number",
            });
        }
        if key.is_fraction() && value > 1.0 {
            return Err(AmforgeError::InvalidParameter {
                key: key.key(),
                value,
                requirement: "between 0 and 1",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_unchanged() {
        let params = ParametersBuilder::new().build().unwrap();
        assert_eq!(params, ProcessParameters::default());
    }

    #[test]
    fn overrides_apply_in_order() {
        let params = ParametersBuilder::new()
            .set(ParameterKey::RawWeight, 5.0)
            .set(ParameterKey::RawWeight, 6.0)
            .assign("turbine_output = 75")
            .unwrap()
            .assign("material_type=Ti-6Al-4V")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(params.raw_weight, 6.0);
        assert_eq!(params.turbine_output, 75.0);
        assert_eq!(params.material_type, "Ti-6Al-4V");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ParametersBuilder::new().assign("grid_germany=0.4").unwrap_err();
        assert!(matches!(err, AmforgeError::UnknownParameter(k) if k == "grid_germany"));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = ParametersBuilder::new().assign("energy_am=lots").unwrap_err();
        assert!(matches!(err, AmforgeError::UnparsableValue { .. }));
        let err = ParametersBuilder::new().assign("energy_am").unwrap_err();
        assert!(matches!(err, AmforgeError::UnparsableValue { .. }));
    }

    #[test]
    fn negative_magnitude_is_invalid() {
        let err = ParametersBuilder::new()
            .set(ParameterKey::TransportDistanceAmKm, -1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AmforgeError::InvalidParameter { key: "transport_distance_am_km", .. }
        ));
    }

    #[test]
    fn non_finite_magnitude_is_invalid() {
        for assignment in ["raw_weight=inf", "raw_weight=-inf", "raw_weight=NaN"] {
            let err = ParametersBuilder::new()
                .assign(assignment)
                .unwrap()
                .build()
                .unwrap_err();
            assert!(
                matches!(err, AmforgeError::InvalidParameter { key: "raw_weight", .. }),
                "{} was accepted",
                assignment
            );
        }
    }

    #[test]
    fn fraction_must_stay_within_unit_interval() {
        let err = ParametersBuilder::new()
            .set(ParameterKey::EfficiencyLossFraction, 1.5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            AmforgeError::InvalidParameter { key: "efficiency_loss_fraction", .. }
        ));
        assert!(ParametersBuilder::new()
            .set(ParameterKey::EfficiencyLossFraction, 1.0)
            .build()
            .is_ok());
    }

    #[test]
    fn large_values_have_no_upper_bound() {
        assert!(ParametersBuilder::new()
            .set(ParameterKey::TurbineOutput, 1e7)
            .set(ParameterKey::TransportDistanceStandardKm, 40_000.0)
            .build()
            .is_ok());
    }
}
