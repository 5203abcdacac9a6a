//! This module renders the result charts of an export run as PNG files.

use anyhow::Result;
use amforge_core::evaluator::{CountryBreakdown, ScenarioResults};
use amforge_schemas::stage::{Scenario, Stage};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

const BAR_WIDTH: f64 = 0.35;

/// The main function to generate and save all charts for an export run.
pub fn generate_all_plots(
    output_dir: &Path,
    country: &str,
    lifecycle: &ScenarioResults,
    breakdown: &[CountryBreakdown],
) -> Result<()> {
    info!("Generating charts from evaluation results");

    plot_lifecycle_breakdown(&output_dir.join("1_lifecycle_breakdown.png"), country, lifecycle)?;

    if breakdown.is_empty() {
        warn!("No countries to plot, skipping country comparison chart");
    } else {
        plot_country_stack(&output_dir.join("2_country_comparison.png"), breakdown)?;
    }

    info!(dir = %output_dir.display(), "Charts have been saved");
    Ok(())
}

fn axis_top(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Names the category whose slot is centred on an integer position.
fn category_label(labels: &[String], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

/// Grouped bar chart of stage emissions, Standard next to AM.
fn plot_lifecycle_breakdown(path: &Path, country: &str, results: &ScenarioResults) -> Result<()> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_mass = results
        .standard
        .iter()
        .chain(results.am.iter())
        .map(|r| r.mass_kg_co2e)
        .fold(0.0, f64::max);
    let labels: Vec<String> = Stage::ALL.iter().map(|s| s.name().to_string()).collect();
    let label_fmt = |x: &f64| category_label(&labels, *x);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Lifecycle Stage Emissions ({} grid mix)", country),
            ("sans-serif", 40).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(Stage::ALL.len() as f64 - 0.5), 0f64..axis_top(max_mass))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(Stage::ALL.len() * 2 + 1)
        .x_label_formatter(&label_fmt)
        .y_desc("kg CO2e")
        .draw()?;

    let series = [(Scenario::Standard, RED, -BAR_WIDTH), (Scenario::Am, BLUE, 0.0)];
    for (scenario, color, offset) in series {
        chart
            .draw_series(results.scenario(scenario).iter().enumerate().map(|(i, r)| {
                let x = i as f64 + offset;
                Rectangle::new([(x, 0.0), (x + BAR_WIDTH, r.mass_kg_co2e)], color.filled())
            }))?
            .label(scenario.label())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Stacked bar chart of stage emissions per country for one route.
fn plot_country_stack(path: &Path, rows: &[CountryBreakdown]) -> Result<()> {
    let root = BitMapBackend::new(path, (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let scenario = rows[0].scenario;
    let max_total = rows.iter().map(|r| r.total).fold(0.0, f64::max);
    let labels: Vec<String> = rows.iter().map(|r| r.country.clone()).collect();
    let label_fmt = |x: &f64| category_label(&labels, *x);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Stacked Lifecycle Emissions by Country ({} process)", scenario),
            ("sans-serif", 40).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(rows.len() as f64 - 0.5), 0f64..axis_top(max_total))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len() * 2 + 1)
        .x_label_formatter(&label_fmt)
        .y_desc("kg CO2e")
        .draw()?;

    let colors = [BLUE, RED, GREEN, MAGENTA];
    for (s, stage) in Stage::ALL.iter().enumerate() {
        let color = colors[s % colors.len()];
        chart
            .draw_series(rows.iter().enumerate().map(|(i, r)| {
                let base: f64 = r.stages[..s].iter().sum();
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_WIDTH, base), (x + BAR_WIDTH, base + r.stages[s])],
                    color.filled(),
                )
            }))?
            .label(stage.name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
