use crate::config::CaseConfig;
use crate::plotting;
use anyhow::{Context, Result};
use amforge_core::{
    catalog::{default_selection, find_grid, select_grids},
    evaluator::{
        self, ComparisonRow, CountryBreakdown, LocationComparison, RankKey, ScenarioResults,
        SortOrder,
    },
    export::{write_csv_file, write_json_file},
    report,
};
use amforge_schemas::{
    grid::GridProfile,
    parameters::{ParameterKey, ProcessParameters},
    stage::{Scenario, Stage},
};
use serde::Serialize;
use std::{
    fs,
    path::PathBuf,
};
use tracing::{info, warn};

/// How the multi-country views pick and order their rows.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub countries: Vec<String>,
    pub all: bool,
    pub scenario: Scenario,
    pub rank_by: RankKey,
    pub order: SortOrder,
}

/// Numeric results of an export, written alongside the formatted tables.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    generated_at: String,
    parameters: &'a ProcessParameters,
    baseline: &'a str,
    lifecycle: &'a ScenarioResults,
    location: &'a LocationComparison,
    comparison: &'a [ComparisonRow],
    breakdown: &'a [CountryBreakdown],
}

fn selected_grids(case: &CaseConfig, options: &CompareOptions) -> Result<Vec<GridProfile>> {
    if options.all {
        return Ok(case.catalog.clone());
    }
    if options.countries.is_empty() {
        return Ok(default_selection(&case.catalog));
    }
    select_grids(&case.catalog, options.countries.as_slice()).context("Invalid country selection")
}

pub fn parameter_sheet(params: &ProcessParameters) -> String {
    let mut table = String::from("| Parameter | Value | Unit | Description |\n");
    table.push_str("|-----------|-------|------|-------------|\n");
    table.push_str(&format!(
        "| Material Type | {} | | Type of alloy used for blades. Determines the material emission factor. |\n",
        params.material_type
    ));
    for key in ParameterKey::ALL {
        table.push_str(&format!(
            "| {} (`{}`) | {} | {} | {} |\n",
            key.label(),
            key.key(),
            params.value(key),
            key.unit(),
            key.description()
        ));
    }
    table
}

pub fn print_parameter_sheet(params: &ProcessParameters) {
    println!("\nProduction Site Input Requirements - Blade Case\n");
    print!("{}", parameter_sheet(params));
}

pub fn run_breakdown(case: &CaseConfig, country: &str) -> Result<()> {
    let grid = find_grid(&case.catalog, country)?;
    info!(country = %grid.country, grid_factor = grid.emission_factor, "evaluating lifecycle breakdown");
    let results = evaluator::evaluate(&case.parameters, grid.emission_factor);

    println!(
        "\nLifecycle Stage Emissions ({} grid mix, {} kg CO2e/kWh)\n",
        grid.country, grid.emission_factor
    );
    for stage in Stage::ALL {
        println!("  - {}: {}", stage, stage.description());
    }
    println!();
    print!("{}", report::lifecycle_table(&results));
    Ok(())
}

pub fn run_location(case: &CaseConfig, country: &str) -> Result<()> {
    let grid = find_grid(&case.catalog, country)?;
    info!(country = %grid.country, "comparing stages for production location");
    let location = evaluator::compare_stages(&case.parameters, grid);

    println!("\nScenario by Production Location: {}\n", location.country);
    print!("{}", report::location_table(&location));
    println!(
        "\nTotal CO2 reduction: {} kg CO2e ({})",
        report::format_mass(location.total.difference),
        report::format_percent(location.total.reduction_percent)
    );
    Ok(())
}

pub fn run_compare(case: &CaseConfig, options: &CompareOptions) -> Result<()> {
    let grids = selected_grids(case, options)?;
    if grids.is_empty() {
        warn!("No countries selected, nothing to compare");
        return Ok(());
    }
    info!(countries = grids.len(), rank_by = %options.rank_by, "comparing grid mixes");

    let rows = evaluator::compare_across_grids(&case.parameters, &grids);
    let ranked = evaluator::rank(&rows, options.rank_by, options.order);
    let breakdown = evaluator::breakdown_across_grids(&case.parameters, &grids, options.scenario);

    println!("\nMulti-Country Comparison (ranked by {})\n", options.rank_by);
    print!("{}", report::comparison_table(&ranked));
    println!("\nLifecycle Emissions by Country ({} process)\n", options.scenario);
    print!("{}", report::breakdown_table(&breakdown));
    Ok(())
}

/// Writes every view of the case into `out` (or a fresh timestamped run
/// directory) and returns the directory used. The lifecycle section uses the
/// `baseline` grid mix, the per-stage section the `country` one.
pub fn run_export(
    case: &CaseConfig,
    out: Option<PathBuf>,
    baseline: &str,
    country: &str,
    options: &CompareOptions,
) -> Result<PathBuf> {
    let now = chrono::Utc::now();
    let output_dir = out.unwrap_or_else(|| {
        PathBuf::from(format!("./data/runs/blade_case_{}", now.format("%Y%m%d_%H%M%S")))
    });
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;
    info!(dir = %output_dir.display(), "exporting results");

    let baseline = find_grid(&case.catalog, baseline)?;
    let lifecycle = evaluator::evaluate(&case.parameters, baseline.emission_factor);
    let location = evaluator::compare_stages(&case.parameters, find_grid(&case.catalog, country)?);

    let grids = selected_grids(case, options)?;
    if grids.is_empty() {
        warn!("No countries selected, the comparison sections will be empty");
    }
    let rows = evaluator::rank(
        &evaluator::compare_across_grids(&case.parameters, &grids),
        options.rank_by,
        options.order,
    );
    let breakdown = evaluator::breakdown_across_grids(&case.parameters, &grids, options.scenario);

    write_csv_file(&output_dir.join("records.csv"), &report::flatten(&location, &rows))?;
    write_csv_file(
        &output_dir.join("breakdown.csv"),
        &report::breakdown_records(&breakdown),
    )?;
    write_json_file(
        &output_dir.join("results.json"),
        &RunSummary {
            generated_at: now.to_rfc3339(),
            parameters: &case.parameters,
            baseline: &baseline.country,
            lifecycle: &lifecycle,
            location: &location,
            comparison: &rows,
            breakdown: &breakdown,
        },
    )?;

    let summary = summary_document(
        &case.parameters,
        &baseline.country,
        &lifecycle,
        &location,
        &rows,
        &breakdown,
        options,
        &now.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    fs::write(output_dir.join("summary.md"), summary)
        .with_context(|| format!("Failed to write summary into {:?}", output_dir))?;

    plotting::generate_all_plots(&output_dir, &baseline.country, &lifecycle, &breakdown)?;

    Ok(output_dir)
}

fn summary_document(
    params: &ProcessParameters,
    baseline: &str,
    lifecycle: &ScenarioResults,
    location: &LocationComparison,
    rows: &[ComparisonRow],
    breakdown: &[CountryBreakdown],
    options: &CompareOptions,
    generated_at: &str,
) -> String {
    let mut doc = String::from("# Blade Case - LCA Results\n\n");
    doc.push_str(&format!("Generated {}.\n\n", generated_at));

    doc.push_str("## Input Data\n\n");
    doc.push_str(&parameter_sheet(params));

    doc.push_str(&format!(
        "\n## Lifecycle Breakdown ({} grid mix)\n\n",
        baseline
    ));
    doc.push_str(&report::lifecycle_table(lifecycle));

    doc.push_str(&format!(
        "\n## Scenario by Production Location: {}\n\n",
        location.country
    ));
    doc.push_str(&report::location_table(location));

    doc.push_str(&format!(
        "\n## Multi-Country Comparison (ranked by {})\n\n",
        options.rank_by
    ));
    if rows.is_empty() {
        doc.push_str("No countries selected.\n");
    } else {
        doc.push_str(&report::comparison_table(rows));
        doc.push_str(&format!(
            "\n### Lifecycle Emissions by Country ({} process)\n\n",
            options.scenario
        ));
        doc.push_str(&report::breakdown_table(breakdown));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use amforge_schemas::grid::reference_catalog;

    fn case() -> CaseConfig {
        CaseConfig {
            parameters: ProcessParameters::default(),
            catalog: reference_catalog(),
        }
    }

    fn options(countries: &[&str]) -> CompareOptions {
        CompareOptions {
            countries: countries.iter().map(|c| c.to_string()).collect(),
            all: false,
            scenario: Scenario::Standard,
            rank_by: RankKey::TotalStandard,
            order: SortOrder::Descending,
        }
    }

    #[test]
    fn selection_defaults_to_first_three_countries() {
        let grids = selected_grids(&case(), &options(&[])).unwrap();
        let names: Vec<&str> = grids.iter().map(|g| g.country.as_str()).collect();
        assert_eq!(names, ["Germany", "USA", "China"]);
    }

    #[test]
    fn all_flag_takes_whole_catalog() {
        let mut opts = options(&[]);
        opts.all = true;
        assert_eq!(selected_grids(&case(), &opts).unwrap().len(), 10);
    }

    #[test]
    fn unknown_country_fails_selection() {
        assert!(selected_grids(&case(), &options(&["Narnia"])).is_err());
    }

    #[test]
    fn parameter_sheet_lists_every_field() {
        let sheet = parameter_sheet(&ProcessParameters::default());
        assert_eq!(sheet.lines().count(), 2 + 1 + ParameterKey::ALL.len());
        assert!(sheet.contains("| Downtime Standard (`downtime_standard`) | 6 | months |"));
    }

    #[test]
    fn summary_notes_empty_selection() {
        let case = case();
        let grid = &case.catalog[0];
        let doc = summary_document(
            &case.parameters,
            &grid.country,
            &evaluator::evaluate(&case.parameters, grid.emission_factor),
            &evaluator::compare_stages(&case.parameters, grid),
            &[],
            &[],
            &options(&[]),
            "now",
        );
        assert!(doc.starts_with("# Blade Case - LCA Results"));
        assert!(doc.contains("No countries selected."));
        assert!(doc.contains("## Scenario by Production Location: Germany"));
    }

    #[test]
    fn summary_keeps_baseline_next_to_chosen_location() {
        let case = case();
        let germany = find_grid(&case.catalog, "Germany").unwrap();
        let france = find_grid(&case.catalog, "France").unwrap();
        let doc = summary_document(
            &case.parameters,
            &germany.country,
            &evaluator::evaluate(&case.parameters, germany.emission_factor),
            &evaluator::compare_stages(&case.parameters, france),
            &[],
            &[],
            &options(&[]),
            "now",
        );

        assert!(doc.contains("## Lifecycle Breakdown (Germany grid mix)"));
        assert!(doc.contains("| **Total** | 1893.28 | 242.76 |"));
        assert!(doc.contains("## Scenario by Production Location: France"));
    }
}
