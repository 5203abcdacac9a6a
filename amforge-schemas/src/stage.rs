use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle phases over which emissions are itemized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Material,
    Manufacturing,
    Transport,
    Downtime,
}

impl Stage {
    /// Evaluation and display order. Every per-stage vector follows it.
    pub const ALL: [Stage; 4] = [
        Stage::Material,
        Stage::Manufacturing,
        Stage::Transport,
        Stage::Downtime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Material => "Material",
            Stage::Manufacturing => "Manufacturing",
            Stage::Transport => "Transport",
            Stage::Downtime => "Downtime",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Material => "CO2 from raw material production",
            Stage::Manufacturing => {
                "CO2 from energy use during manufacturing and protective gas in AM"
            }
            Stage::Transport => "CO2 from moving finished or semi-finished parts to site",
            Stage::Downtime => "CO2 from efficiency loss during the repair period",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Manufacturing route of the blade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Cast or forged blade, the emissions baseline.
    Standard,
    /// Additively manufactured blade.
    #[serde(rename = "AM")]
    Am,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Standard, Scenario::Am];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Standard => "Standard",
            Scenario::Am => "AM",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_order_is_material_first_downtime_last() {
        assert_eq!(Stage::ALL[0], Stage::Material);
        assert_eq!(Stage::ALL[3], Stage::Downtime);
        let names: Vec<&str> = Stage::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Material", "Manufacturing", "Transport", "Downtime"]);
    }

    #[test]
    fn am_scenario_serializes_with_upper_case_tag() {
        let json = serde_json::to_string(&Scenario::Am).unwrap();
        assert_eq!(json, "\"AM\"");
        let back: Scenario = serde_json::from_str("\"Standard\"").unwrap();
        assert_eq!(back, Scenario::Standard);
    }
}
