//! Runs the emission model over both routes and derives the comparison tables
//! built on top of it: totals, reductions, per-country rows and rankings.

use crate::emission::{
    downtime_emission, kg_to_tonnes, manufacturing_emission, material_emission, months_to_hours,
    transport_emission, weeks_to_hours,
};
use amforge_schemas::{
    grid::GridProfile,
    parameters::ProcessParameters,
    stage::{Scenario, Stage},
};
use serde::Serialize;
use std::{cmp::Ordering, fmt, str::FromStr};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageResult {
    pub stage: Stage,
    pub scenario: Scenario,
    pub mass_kg_co2e: f64,
}

/// Stage results of both routes at one grid factor, each in `Stage::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResults {
    pub grid_factor: f64,
    pub standard: [StageResult; 4],
    pub am: [StageResult; 4],
}

impl ScenarioResults {
    pub fn scenario(&self, scenario: Scenario) -> &[StageResult; 4] {
        match scenario {
            Scenario::Standard => &self.standard,
            Scenario::Am => &self.am,
        }
    }

    pub fn total_standard(&self) -> f64 {
        total(&self.standard)
    }

    pub fn total_am(&self) -> f64 {
        total(&self.am)
    }

    pub fn reduction_percent(&self) -> Option<f64> {
        reduction_percent(self.total_standard(), self.total_am())
    }
}

/// Aggregate comparison of both routes for one country's grid mix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub country: String,
    pub grid_factor: f64,
    pub total_standard: f64,
    pub total_am: f64,
    /// Standard minus AM.
    pub difference: f64,
    /// `None` when the Standard total is zero.
    pub reduction_percent: Option<f64>,
}

/// One line of the per-stage table for a single location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageComparisonRow {
    pub label: String,
    pub standard: f64,
    pub am: f64,
    pub difference: f64,
    pub reduction_percent: Option<f64>,
}

impl StageComparisonRow {
    fn new(label: impl Into<String>, standard: f64, am: f64) -> Self {
        Self {
            label: label.into(),
            standard,
            am,
            difference: standard - am,
            reduction_percent: reduction_percent(standard, am),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationComparison {
    pub country: String,
    pub grid_factor: f64,
    pub stages: Vec<StageComparisonRow>,
    pub total: StageComparisonRow,
}

/// Stage masses of a single route for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryBreakdown {
    pub country: String,
    pub grid_factor: f64,
    pub scenario: Scenario,
    /// Indexed like `Stage::ALL`.
    pub stages: [f64; 4],
    pub total: f64,
}

/// Emission of one stage of one route.
pub fn stage_emission(
    params: &ProcessParameters,
    scenario: Scenario,
    stage: Stage,
    grid_factor: f64,
) -> f64 {
    match (stage, scenario) {
        (Stage::Material, Scenario::Standard) => {
            material_emission(params.raw_weight, params.material_emission_factor)
        }
        // Near-net-shape build, no machining loss.
        (Stage::Material, Scenario::Am) => {
            material_emission(params.finished_weight, params.material_emission_factor)
        }
        (Stage::Manufacturing, Scenario::Standard) => {
            manufacturing_emission(params.energy_standard, grid_factor, 0.0, 0.0)
        }
        (Stage::Manufacturing, Scenario::Am) => manufacturing_emission(
            params.energy_am,
            grid_factor,
            params.shielding_gas_volume,
            params.shielding_gas_emission_factor,
        ),
        (Stage::Transport, Scenario::Standard) => transport_emission(
            kg_to_tonnes(params.finished_weight),
            params.transport_distance_standard_km,
            params.transport_emission_factor,
        ),
        (Stage::Transport, Scenario::Am) => transport_emission(
            kg_to_tonnes(params.finished_weight),
            params.transport_distance_am_km,
            params.transport_emission_factor,
        ),
        (Stage::Downtime, Scenario::Standard) => downtime_emission(
            params.turbine_output,
            params.efficiency_loss_fraction,
            months_to_hours(params.downtime_standard),
            grid_factor,
        ),
        (Stage::Downtime, Scenario::Am) => downtime_emission(
            params.turbine_output,
            params.efficiency_loss_fraction,
            weeks_to_hours(params.downtime_am),
            grid_factor,
        ),
    }
}

fn evaluate_scenario(
    params: &ProcessParameters,
    scenario: Scenario,
    grid_factor: f64,
) -> [StageResult; 4] {
    Stage::ALL.map(|stage| StageResult {
        stage,
        scenario,
        mass_kg_co2e: stage_emission(params, scenario, stage, grid_factor),
    })
}

/// Evaluates all four stages of both routes at `grid_factor`.
pub fn evaluate(params: &ProcessParameters, grid_factor: f64) -> ScenarioResults {
    let results = ScenarioResults {
        grid_factor,
        standard: evaluate_scenario(params, Scenario::Standard, grid_factor),
        am: evaluate_scenario(params, Scenario::Am, grid_factor),
    };
    debug!(
        grid_factor,
        total_standard = results.total_standard(),
        total_am = results.total_am(),
        "evaluated scenarios"
    );
    results
}

pub fn total(stage_results: &[StageResult]) -> f64 {
    stage_results.iter().map(|r| r.mass_kg_co2e).sum()
}

/// Share of the Standard emissions avoided by the AM route, in percent.
///
/// Returns `None` when `total_standard` is zero, since the ratio has no value
/// there. A negative result means AM emits more.
pub fn reduction_percent(total_standard: f64, total_am: f64) -> Option<f64> {
    if total_standard == 0.0 {
        return None;
    }
    Some((total_standard - total_am) / total_standard * 100.0)
}

/// One comparison row per grid profile, in the order given.
pub fn compare_across_grids(
    params: &ProcessParameters,
    grid_profiles: &[GridProfile],
) -> Vec<ComparisonRow> {
    grid_profiles
        .iter()
        .map(|grid| {
            let results = evaluate(params, grid.emission_factor);
            let total_standard = results.total_standard();
            let total_am = results.total_am();
            ComparisonRow {
                country: grid.country.clone(),
                grid_factor: grid.emission_factor,
                total_standard,
                total_am,
                difference: total_standard - total_am,
                reduction_percent: reduction_percent(total_standard, total_am),
            }
        })
        .collect()
}

/// Per-stage table for one location, closed by a total row.
pub fn compare_stages(params: &ProcessParameters, grid: &GridProfile) -> LocationComparison {
    let results = evaluate(params, grid.emission_factor);
    let stages = results
        .standard
        .iter()
        .zip(results.am.iter())
        .map(|(standard, am)| {
            StageComparisonRow::new(standard.stage.name(), standard.mass_kg_co2e, am.mass_kg_co2e)
        })
        .collect();

    LocationComparison {
        country: grid.country.clone(),
        grid_factor: grid.emission_factor,
        stages,
        total: StageComparisonRow::new("Total", results.total_standard(), results.total_am()),
    }
}

/// Stage masses of `scenario` for every grid profile, in the order given.
pub fn breakdown_across_grids(
    params: &ProcessParameters,
    grid_profiles: &[GridProfile],
    scenario: Scenario,
) -> Vec<CountryBreakdown> {
    grid_profiles
        .iter()
        .map(|grid| {
            let results = evaluate_scenario(params, scenario, grid.emission_factor);
            CountryBreakdown {
                country: grid.country.clone(),
                grid_factor: grid.emission_factor,
                scenario,
                stages: results.map(|r| r.mass_kg_co2e),
                total: total(&results),
            }
        })
        .collect()
}

/// Field of a [`ComparisonRow`] used for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    GridFactor,
    TotalStandard,
    TotalAm,
    Difference,
    ReductionPercent,
}

impl RankKey {
    /// The row's value for this key. Undefined and NaN values yield `None`.
    pub fn value(&self, row: &ComparisonRow) -> Option<f64> {
        let value = match self {
            RankKey::GridFactor => Some(row.grid_factor),
            RankKey::TotalStandard => Some(row.total_standard),
            RankKey::TotalAm => Some(row.total_am),
            RankKey::Difference => Some(row.difference),
            RankKey::ReductionPercent => row.reduction_percent,
        };
        value.filter(|v| !v.is_nan())
    }

    fn name(&self) -> &'static str {
        match self {
            RankKey::GridFactor => "grid-factor",
            RankKey::TotalStandard => "total-standard",
            RankKey::TotalAm => "total-am",
            RankKey::Difference => "difference",
            RankKey::ReductionPercent => "reduction",
        }
    }
}

impl fmt::Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            RankKey::GridFactor,
            RankKey::TotalStandard,
            RankKey::TotalAm,
            RankKey::Difference,
            RankKey::ReductionPercent,
        ]
        .into_iter()
        .find(|k| k.name() == s)
        .ok_or_else(|| {
            format!(
                "unknown rank key '{}', expected one of: grid-factor, total-standard, total-am, difference, reduction",
                s
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("unknown sort order '{}', expected 'asc' or 'desc'", s)),
        }
    }
}

/// Stable sort of `rows` by `key`.
///
/// Rows with equal keys keep their input order. Rows whose key is undefined
/// go last in either order.
pub fn rank(rows: &[ComparisonRow], key: RankKey, order: SortOrder) -> Vec<ComparisonRow> {
    let mut ranked = rows.to_vec();
    ranked.sort_by(|a, b| match (key.value(a), key.value(b)) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}

/// Positions of the extreme values, used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    pub max_index: usize,
    pub min_index: usize,
}

/// Index of the first maximum and first minimum among the defined values.
pub fn extrema<I>(values: I) -> Option<Extrema>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut found: Option<(Extrema, f64, f64)> = None;
    for (i, value) in values.into_iter().enumerate() {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            continue;
        };
        found = Some(match found {
            None => (Extrema { max_index: i, min_index: i }, v, v),
            Some((mut ext, max, min)) => {
                let max = if v > max {
                    ext.max_index = i;
                    v
                } else {
                    max
                };
                let min = if v < min {
                    ext.min_index = i;
                    v
                } else {
                    min
                };
                (ext, max, min)
            }
        });
    }
    found.map(|(ext, _, _)| ext)
}
