//! Input parameters of the blade case and the sheet describing each of them.

use serde::{Deserialize, Serialize};

/// Every input the emission model reads for both manufacturing routes.
///
/// Values are taken as supplied. Range checks belong to whoever builds the
/// record, not to the formulas that consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessParameters {
    /// Alloy label, informational only.
    pub material_type: String,
    /// Semi-finished mass before machining, kg.
    pub raw_weight: f64,
    /// Blade mass after manufacturing, kg.
    pub finished_weight: f64,
    /// kg CO2e per kg of alloy.
    pub material_emission_factor: f64,
    /// kWh.
    pub energy_standard: f64,
    /// kWh.
    pub energy_am: f64,
    /// m³ of shielding gas per AM build.
    pub shielding_gas_volume: f64,
    /// kg CO2e per m³.
    pub shielding_gas_emission_factor: f64,
    pub transport_distance_standard_km: f64,
    pub transport_distance_am_km: f64,
    /// kg CO2e per tonne·km.
    pub transport_emission_factor: f64,
    /// Months.
    pub downtime_standard: f64,
    /// Weeks.
    pub downtime_am: f64,
    /// Fraction of turbine output lost while the blade is out, 0 to 1.
    pub efficiency_loss_fraction: f64,
    /// MW.
    pub turbine_output: f64,
}

impl Default for ProcessParameters {
    fn default() -> Self {
        Self {
            material_type: "Ni-based Alloy".to_string(),
            raw_weight: 4.0,
            finished_weight: 3.2,
            material_emission_factor: 22.0,
            energy_standard: 150.0,
            energy_am: 90.0,
            shielding_gas_volume: 2.0,
            shielding_gas_emission_factor: 0.5,
            transport_distance_standard_km: 9000.0,
            transport_distance_am_km: 500.0,
            transport_emission_factor: 0.6,
            downtime_standard: 6.0,
            downtime_am: 2.0,
            efficiency_loss_fraction: 0.02,
            turbine_output: 50.0,
        }
    }
}

/// Identifies one numeric field of [`ProcessParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    RawWeight,
    FinishedWeight,
    MaterialEmissionFactor,
    EnergyStandard,
    EnergyAm,
    ShieldingGasVolume,
    ShieldingGasEmissionFactor,
    TransportDistanceStandardKm,
    TransportDistanceAmKm,
    TransportEmissionFactor,
    DowntimeStandard,
    DowntimeAm,
    EfficiencyLossFraction,
    TurbineOutput,
}

impl ParameterKey {
    /// Order of the input sheet.
    pub const ALL: [ParameterKey; 14] = [
        ParameterKey::RawWeight,
        ParameterKey::FinishedWeight,
        ParameterKey::MaterialEmissionFactor,
        ParameterKey::EnergyStandard,
        ParameterKey::EnergyAm,
        ParameterKey::ShieldingGasVolume,
        ParameterKey::ShieldingGasEmissionFactor,
        ParameterKey::TransportDistanceStandardKm,
        ParameterKey::TransportDistanceAmKm,
        ParameterKey::TransportEmissionFactor,
        ParameterKey::DowntimeStandard,
        ParameterKey::DowntimeAm,
        ParameterKey::EfficiencyLossFraction,
        ParameterKey::TurbineOutput,
    ];

    /// Field name as it appears in YAML files and `--set` overrides.
    pub fn key(&self) -> &'static str {
        match self {
            ParameterKey::RawWeight => "raw_weight",
            ParameterKey::FinishedWeight => "finished_weight",
            ParameterKey::MaterialEmissionFactor => "material_emission_factor",
            ParameterKey::EnergyStandard => "energy_standard",
            ParameterKey::EnergyAm => "energy_am",
            ParameterKey::ShieldingGasVolume => "shielding_gas_volume",
            ParameterKey::ShieldingGasEmissionFactor => "shielding_gas_emission_factor",
            ParameterKey::TransportDistanceStandardKm => "transport_distance_standard_km",
            ParameterKey::TransportDistanceAmKm => "transport_distance_am_km",
            ParameterKey::TransportEmissionFactor => "transport_emission_factor",
            ParameterKey::DowntimeStandard => "downtime_standard",
            ParameterKey::DowntimeAm => "downtime_am",
            ParameterKey::EfficiencyLossFraction => "efficiency_loss_fraction",
            ParameterKey::TurbineOutput => "turbine_output",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParameterKey::RawWeight => "Raw Weight",
            ParameterKey::FinishedWeight => "Finished Weight",
            ParameterKey::MaterialEmissionFactor => "Material Emission Factor",
            ParameterKey::EnergyStandard => "Energy Standard",
            ParameterKey::EnergyAm => "Energy AM",
            ParameterKey::ShieldingGasVolume => "Shielding Gas Volume",
            ParameterKey::ShieldingGasEmissionFactor => "Shielding Gas Emission Factor",
            ParameterKey::TransportDistanceStandardKm => "Transport Distance Standard",
            ParameterKey::TransportDistanceAmKm => "Transport Distance AM",
            ParameterKey::TransportEmissionFactor => "Transport Emission Factor",
            ParameterKey::DowntimeStandard => "Downtime Standard",
            ParameterKey::DowntimeAm => "Downtime AM",
            ParameterKey::EfficiencyLossFraction => "Efficiency Loss",
            ParameterKey::TurbineOutput => "Turbine Output",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ParameterKey::RawWeight | ParameterKey::FinishedWeight => "kg",
            ParameterKey::MaterialEmissionFactor => "kg CO2e/kg",
            ParameterKey::EnergyStandard | ParameterKey::EnergyAm => "kWh",
            ParameterKey::ShieldingGasVolume => "m³",
            ParameterKey::ShieldingGasEmissionFactor => "kg CO2e/m³",
            ParameterKey::TransportDistanceStandardKm | ParameterKey::TransportDistanceAmKm => "km",
            ParameterKey::TransportEmissionFactor => "kg CO2e/t·km",
            ParameterKey::DowntimeStandard => "months",
            ParameterKey::DowntimeAm => "weeks",
            ParameterKey::EfficiencyLossFraction => "fraction",
            ParameterKey::TurbineOutput => "MW",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ParameterKey::RawWeight => "Weight of semi-finished raw material before machining.",
            ParameterKey::FinishedWeight => "Final weight of the blade after manufacturing.",
            ParameterKey::MaterialEmissionFactor => "Emission factor for the chosen alloy material.",
            ParameterKey::EnergyStandard => "Manufacturing energy consumption for the standard process.",
            ParameterKey::EnergyAm => "Manufacturing energy consumption for the AM process.",
            ParameterKey::ShieldingGasVolume => "Volume of shielding gas used in the AM process.",
            ParameterKey::ShieldingGasEmissionFactor => "Emission factor of the shielding gas.",
            ParameterKey::TransportDistanceStandardKm => {
                "Transport distance for the standard manufacturing route."
            }
            ParameterKey::TransportDistanceAmKm => {
                "Transport distance for the AM route (usually local)."
            }
            ParameterKey::TransportEmissionFactor => "Emission factor for air transport per tonne·km.",
            ParameterKey::DowntimeStandard => "Downtime duration with the standard process.",
            ParameterKey::DowntimeAm => "Downtime duration with the AM process.",
            ParameterKey::EfficiencyLossFraction => "Efficiency loss rate during downtime.",
            ParameterKey::TurbineOutput => "Output power of the turbine.",
        }
    }

    /// True for the one field bounded above by 1.
    pub fn is_fraction(&self) -> bool {
        matches!(self, ParameterKey::EfficiencyLossFraction)
    }
}

impl ProcessParameters {
    pub fn value(&self, key: ParameterKey) -> f64 {
        match key {
            ParameterKey::RawWeight => self.raw_weight,
            ParameterKey::FinishedWeight => self.finished_weight,
            ParameterKey::MaterialEmissionFactor => self.material_emission_factor,
            ParameterKey::EnergyStandard => self.energy_standard,
            ParameterKey::EnergyAm => self.energy_am,
            ParameterKey::ShieldingGasVolume => self.shielding_gas_volume,
            ParameterKey::ShieldingGasEmissionFactor => self.shielding_gas_emission_factor,
            ParameterKey::TransportDistanceStandardKm => self.transport_distance_standard_km,
            ParameterKey::TransportDistanceAmKm => self.transport_distance_am_km,
            ParameterKey::TransportEmissionFactor => self.transport_emission_factor,
            ParameterKey::DowntimeStandard => self.downtime_standard,
            ParameterKey::DowntimeAm => self.downtime_am,
            ParameterKey::EfficiencyLossFraction => self.efficiency_loss_fraction,
            ParameterKey::TurbineOutput => self.turbine_output,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with_value(mut self, key: ParameterKey, value: f64) -> Self {
        let slot = match key {
            ParameterKey::RawWeight => &mut self.raw_weight,
            ParameterKey::FinishedWeight => &mut self.finished_weight,
            ParameterKey::MaterialEmissionFactor => &mut self.material_emission_factor,
            ParameterKey::EnergyStandard => &mut self.energy_standard,
            ParameterKey::EnergyAm => &mut self.energy_am,
            ParameterKey::ShieldingGasVolume => &mut self.shielding_gas_volume,
            ParameterKey::ShieldingGasEmissionFactor => &mut self.shielding_gas_emission_factor,
            ParameterKey::TransportDistanceStandardKm => &mut self.transport_distance_standard_km,
            ParameterKey::TransportDistanceAmKm => &mut self.transport_distance_am_km,
            ParameterKey::TransportEmissionFactor => &mut self.transport_emission_factor,
            ParameterKey::DowntimeStandard => &mut self.downtime_standard,
            ParameterKey::DowntimeAm => &mut self.downtime_am,
            ParameterKey::EfficiencyLossFraction => &mut self.efficiency_loss_fraction,
            ParameterKey::TurbineOutput => &mut self.turbine_output,
        };
        *slot = value;
        self
    }
}
