//! Formatting of evaluation results into flat records and Markdown tables.

use crate::evaluator::{
    extrema, ComparisonRow, CountryBreakdown, LocationComparison, ScenarioResults,
};
use amforge_schemas::stage::Stage;
use serde::Serialize;

pub const UNDEFINED: &str = "N/A";

/// Masses are shown with two decimals.
pub fn format_mass(value: f64) -> String {
    format!("{:.2}", value)
}

/// Percentages are shown with one decimal and a trailing `%`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(p) if !p.is_nan() => format!("{:.1}%", p),
        _ => UNDEFINED.to_string(),
    }
}

/// One line of the exported record set. Every numeric field is pre-formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub section: String,
    pub label: String,
    pub standard: String,
    pub am: String,
    pub difference: String,
    pub reduction: String,
}

/// Stage masses of one country, formatted for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRecord {
    pub country: String,
    pub scenario: String,
    pub material: String,
    pub manufacturing: String,
    pub transport: String,
    pub downtime: String,
    pub total: String,
}

/// Flattens the per-stage table of a location and the cross-country rows.
pub fn flatten(location: &LocationComparison, rows: &[ComparisonRow]) -> Vec<ExportRecord> {
    let section = format!("Lifecycle ({})", location.country);
    let mut records: Vec<ExportRecord> = location
        .stages
        .iter()
        .chain(std::iter::once(&location.total))
        .map(|r| ExportRecord {
            section: section.clone(),
            label: r.label.clone(),
            standard: format_mass(r.standard),
            am: format_mass(r.am),
            difference: format_mass(r.difference),
            reduction: format_percent(r.reduction_percent),
        })
        .collect();

    records.extend(rows.iter().map(|r| ExportRecord {
        section: "Countries".to_string(),
        label: r.country.clone(),
        standard: format_mass(r.total_standard),
        am: format_mass(r.total_am),
        difference: format_mass(r.difference),
        reduction: format_percent(r.reduction_percent),
    }));
    records
}

pub fn breakdown_records(rows: &[CountryBreakdown]) -> Vec<BreakdownRecord> {
    rows.iter()
        .map(|r| BreakdownRecord {
            country: r.country.clone(),
            scenario: r.scenario.label().to_string(),
            material: format_mass(r.stages[0]),
            manufacturing: format_mass(r.stages[1]),
            transport: format_mass(r.stages[2]),
            downtime: format_mass(r.stages[3]),
            total: format_mass(r.total),
        })
        .collect()
}

fn marker(index: usize, max: Option<usize>, min: Option<usize>, max_note: &str, min_note: &str) -> String {
    let mut notes = Vec::new();
    if max == Some(index) {
        notes.push(max_note);
    }
    if min == Some(index) {
        notes.push(min_note);
    }
    notes.join(", ")
}

/// Stage × scenario matrix at one grid factor, with the overall reduction.
pub fn lifecycle_table(results: &ScenarioResults) -> String {
    let mut table = String::from("| Stage | Standard | AM |\n");
    table.push_str("|-------|----------|----|\n");
    for (standard, am) in results.standard.iter().zip(results.am.iter()) {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            standard.stage,
            format_mass(standard.mass_kg_co2e),
            format_mass(am.mass_kg_co2e)
        ));
    }
    table.push_str(&format!(
        "| **Total** | {} | {} |\n",
        format_mass(results.total_standard()),
        format_mass(results.total_am())
    ));
    table.push_str(&format!(
        "\nCO2 reduction: {}\n",
        format_percent(results.reduction_percent())
    ));
    table
}

/// Per-stage comparison for one location. The stage with the largest
/// reduction is marked.
pub fn location_table(location: &LocationComparison) -> String {
    let best = extrema(location.stages.iter().map(|r| r.reduction_percent)).map(|e| e.max_index);

    let mut table =
        String::from("| Stage | Standard | AM | Difference (Standard - AM) | % Reduction | |\n");
    table.push_str("|-------|----------|----|----------------------------|-------------|-|\n");
    for (i, r) in location.stages.iter().enumerate() {
        table.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            r.label,
            format_mass(r.standard),
            format_mass(r.am),
            format_mass(r.difference),
            format_percent(r.reduction_percent),
            marker(i, best, None, "largest reduction", ""),
        ));
    }
    let t = &location.total;
    table.push_str(&format!(
        "| **{}** | {} | {} | {} | {} | |\n",
        t.label,
        format_mass(t.standard),
        format_mass(t.am),
        format_mass(t.difference),
        format_percent(t.reduction_percent),
    ));
    table
}

/// Cross-country totals, extremes of the Standard total marked.
pub fn comparison_table(rows: &[ComparisonRow]) -> String {
    let ext = extrema(rows.iter().map(|r| Some(r.total_standard)));
    let (max, min) = (ext.map(|e| e.max_index), ext.map(|e| e.min_index));

    let mut table = String::from(
        "| Country | Grid (kg CO2e/kWh) | Standard | AM | Difference | % Reduction | |\n",
    );
    table.push_str("|---------|--------------------|----------|----|------------|-------------|-|\n");
    for (i, r) in rows.iter().enumerate() {
        table.push_str(&format!(
            "| {} | {:.2} | {} | {} | {} | {} | {} |\n",
            r.country,
            r.grid_factor,
            format_mass(r.total_standard),
            format_mass(r.total_am),
            format_mass(r.difference),
            format_percent(r.reduction_percent),
            marker(i, max, min, "highest", "lowest"),
        ));
    }
    table
}

/// Stage masses per country, extremes of the total marked.
pub fn breakdown_table(rows: &[CountryBreakdown]) -> String {
    let ext = extrema(rows.iter().map(|r| Some(r.total)));
    let (max, min) = (ext.map(|e| e.max_index), ext.map(|e| e.min_index));

    let mut table = String::from("| Country |");
    for stage in Stage::ALL {
        table.push_str(&format!(" {} |", stage));
    }
    table.push_str(" Total | |\n|---------|");
    table.push_str(&"---|".repeat(Stage::ALL.len()));
    table.push_str("-------|-|\n");

    for (i, r) in rows.iter().enumerate() {
        table.push_str(&format!("| {} |", r.country));
        for value in r.stages {
            table.push_str(&format!(" {} |", format_mass(value)));
        }
        table.push_str(&format!(
            " {} | {} |\n",
            format_mass(r.total),
            marker(i, max, min, "highest", "lowest")
        ));
    }
    table
}
