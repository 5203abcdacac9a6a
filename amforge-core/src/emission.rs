//! Closed-form emission models for the four lifecycle stages.
//!
//! Every function is a plain product of its arguments. Nothing here checks
//! signs or ranges; negative inputs produce negative masses and NaN inputs
//! propagate.

/// A month of downtime is counted as 30 days.
pub const HOURS_PER_MONTH: f64 = 30.0 * 24.0;
pub const HOURS_PER_WEEK: f64 = 7.0 * 24.0;
pub const KG_PER_TONNE: f64 = 1000.0;

/// kg CO2e embodied in `mass_kg` of alloy.
pub fn material_emission(mass_kg: f64, emission_factor: f64) -> f64 {
    mass_kg * emission_factor
}

/// kg CO2e from process electricity plus shielding gas.
///
/// Pass zero for both gas arguments when the route uses no inert gas.
pub fn manufacturing_emission(
    energy_kwh: f64,
    grid_factor: f64,
    gas_volume_m3: f64,
    gas_emission_factor: f64,
) -> f64 {
    energy_kwh * grid_factor + gas_volume_m3 * gas_emission_factor
}

/// kg CO2e for freight, with `emission_factor` in kg CO2e per tonne·km.
pub fn transport_emission(weight_tonnes: f64, distance_km: f64, emission_factor: f64) -> f64 {
    weight_tonnes * distance_km * emission_factor
}

/// kg CO2e of grid electricity that replaces turbine output lost while the
/// blade is out of service.
pub fn downtime_emission(
    turbine_output_mw: f64,
    efficiency_loss_fraction: f64,
    downtime_hours: f64,
    grid_factor: f64,
) -> f64 {
    turbine_output_mw * efficiency_loss_fraction * downtime_hours * grid_factor
}

pub fn months_to_hours(months: f64) -> f64 {
    months * HOURS_PER_MONTH
}

pub fn weeks_to_hours(weeks: f64) -> f64 {
    weeks * HOURS_PER_WEEK
}

pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / KG_PER_TONNE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn material_is_mass_times_factor() {
        assert!(close(material_emission(4.0, 22.0), 88.0));
        assert!(close(material_emission(3.2, 22.0), 70.4));
        for factor in [0.0, 1.5, 22.0, 1e6] {
            assert_eq!(material_emission(0.0, factor), 0.0);
        }
    }

    #[test]
    fn manufacturing_without_gas_is_energy_times_grid() {
        assert!(close(manufacturing_emission(150.0, 0.4, 0.0, 0.0), 60.0));
        assert!(close(manufacturing_emission(90.0, 0.4, 2.0, 0.5), 37.0));
        assert!(close(manufacturing_emission(0.0, 0.4, 2.0, 0.5), 1.0));
    }

    #[test]
    fn transport_is_linear_in_distance() {
        let w = kg_to_tonnes(3.2);
        for d in [0.0, 500.0, 9000.0, 12_345.6] {
            let single = transport_emission(w, d, 0.6);
            let double = transport_emission(w, 2.0 * d, 0.6);
            assert!(close(single * 2.0, double));
        }
        assert!(close(transport_emission(w, 9000.0, 0.6), 17.28));
    }

    #[test]
    fn downtime_is_linear_in_loss_fraction() {
        let hours = months_to_hours(6.0);
        let base = downtime_emission(50.0, 0.02, hours, 0.4);
        let doubled = downtime_emission(50.0, 0.04, hours, 0.4);
        assert!(close(base, 1728.0));
        assert!(close(doubled, 2.0 * base));
    }

    #[test]
    fn duration_conversions() {
        assert_eq!(months_to_hours(1.0), 720.0);
        assert_eq!(weeks_to_hours(1.0), 168.0);
        assert_eq!(months_to_hours(6.0), 4320.0);
        assert_eq!(weeks_to_hours(2.0), 336.0);
    }

    #[test]
    fn nan_propagates_instead_of_panicking() {
        assert!(material_emission(f64::NAN, 1.0).is_nan());
        assert!(downtime_emission(50.0, f64::NAN, 720.0, 0.4).is_nan());
    }
}
