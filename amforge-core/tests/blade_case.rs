use amforge_core::{
    builder::ParametersBuilder,
    catalog::{default_selection, select_grids},
    evaluator::{compare_across_grids, evaluate, rank, reduction_percent, RankKey, SortOrder},
};
use amforge_schemas::{
    grid::reference_catalog,
    parameters::{ParameterKey, ProcessParameters},
    stage::Stage,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn mass(results: &[amforge_core::evaluator::StageResult; 4], stage: Stage) -> f64 {
    results
        .iter()
        .find(|r| r.stage == stage)
        .map(|r| r.mass_kg_co2e)
        .unwrap()
}

#[test]
fn material_stage_uses_raw_mass_for_standard_and_finished_mass_for_am() {
    let params = ParametersBuilder::new()
        .set(ParameterKey::RawWeight, 4.0)
        .set(ParameterKey::FinishedWeight, 3.2)
        .set(ParameterKey::MaterialEmissionFactor, 22.0)
        .build()
        .unwrap();
    let results = evaluate(&params, 0.4);
    assert!(close(mass(&results.standard, Stage::Material), 88.0));
    assert!(close(mass(&results.am, Stage::Material), 70.4));
}

#[test]
fn manufacturing_stage_adds_gas_only_for_am() {
    let params = ParametersBuilder::new()
        .set(ParameterKey::EnergyStandard, 150.0)
        .set(ParameterKey::EnergyAm, 90.0)
        .set(ParameterKey::ShieldingGasVolume, 2.0)
        .set(ParameterKey::ShieldingGasEmissionFactor, 0.5)
        .build()
        .unwrap();
    let results = evaluate(&params, 0.4);
    assert!(close(mass(&results.standard, Stage::Manufacturing), 60.0));
    assert!(close(mass(&results.am, Stage::Manufacturing), 37.0));
}

#[test]
fn downtime_stage_converts_months_to_hours() {
    let params = ParametersBuilder::new()
        .set(ParameterKey::DowntimeStandard, 6.0)
        .set(ParameterKey::TurbineOutput, 50.0)
        .set(ParameterKey::EfficiencyLossFraction, 0.02)
        .build()
        .unwrap();
    let results = evaluate(&params, 0.4);
    assert!(close(mass(&results.standard, Stage::Downtime), 1728.0));
}

#[test]
fn editing_parameters_recomputes_everything() {
    let base = ProcessParameters::default();
    let before = evaluate(&base, 0.4);
    let edited = ParametersBuilder::new()
        .with_parameters(base.clone())
        .set(ParameterKey::DowntimeAm, 4.0)
        .build()
        .unwrap();
    let after = evaluate(&edited, 0.4);

    assert_eq!(before.standard, after.standard);
    assert!(close(
        mass(&after.am, Stage::Downtime),
        2.0 * mass(&before.am, Stage::Downtime)
    ));
    assert_eq!(evaluate(&base, 0.4), before);
}

#[test]
fn full_catalog_comparison_ranks_cleanest_grid_last_by_standard_total() {
    let params = ProcessParameters::default();
    let catalog = reference_catalog();
    let rows = compare_across_grids(&params, &catalog);

    assert_eq!(rows.len(), catalog.len());
    for (row, grid) in rows.iter().zip(catalog.iter()) {
        assert_eq!(row.country, grid.country);
        assert_eq!(row.reduction_percent, reduction_percent(row.total_standard, row.total_am));
    }

    let ranked = rank(&rows, RankKey::TotalStandard, SortOrder::Descending);
    assert_eq!(ranked.first().unwrap().country, "China");
    assert_eq!(ranked.last().unwrap().country, "France");
    assert_eq!(ranked.len(), rows.len());
}

#[test]
fn user_selection_flows_through_comparison_in_order() {
    let catalog = reference_catalog();
    let selected = select_grids(&catalog, &["Canada", "India"]).unwrap();
    let rows = compare_across_grids(&ProcessParameters::default(), &selected);
    let names: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(names, ["Canada", "India"]);

    let defaults = compare_across_grids(&ProcessParameters::default(), &default_selection(&catalog));
    assert_eq!(defaults.len(), 3);
}
