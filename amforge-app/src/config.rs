use anyhow::{Context, Result};
use amforge_core::{builder::ParametersBuilder, catalog::validate_catalog};
use amforge_schemas::{
    file_formats::{GridCatalogFile, ParameterFile},
    grid::{reference_catalog, GridProfile},
    parameters::ProcessParameters,
};
use serde::de::DeserializeOwned;
use std::{fs, path::Path};
use tracing::info;

/// Everything a run reads: validated parameters and the grid-mix catalog.
#[derive(Debug, Clone)]
pub struct CaseConfig {
    pub parameters: ProcessParameters,
    pub catalog: Vec<GridProfile>,
}

impl CaseConfig {
    /// Loads the case from optional YAML files, applies `key=value` overrides
    /// and validates the result. Missing paths fall back to built-in defaults.
    pub fn load(
        params_path: Option<&Path>,
        catalog_path: Option<&Path>,
        overrides: &[String],
    ) -> Result<Self> {
        let base = match params_path {
            Some(path) => {
                let file: ParameterFile = load_yaml_file(path)?;
                info!(path = %path.display(), schema_version = %file.schema_version, "loaded process parameters");
                file.parameters
            }
            None => ProcessParameters::default(),
        };

        let builder = overrides
            .iter()
            .try_fold(ParametersBuilder::new().with_parameters(base), |builder, assignment| {
                builder.assign(assignment)
            })
            .context("Invalid parameter override")?;
        let parameters = builder.build().context("Invalid process parameters")?;

        let catalog = match catalog_path {
            Some(path) => {
                let file: GridCatalogFile = load_yaml_file(path)?;
                info!(path = %path.display(), grids = file.grids.len(), "loaded grid catalog");
                file.grids
            }
            None => reference_catalog(),
        };
        validate_catalog(&catalog).context("Invalid grid catalog")?;

        Ok(Self {
            parameters,
            catalog,
        })
    }
}

fn load_yaml_file<F: DeserializeOwned>(path: &Path) -> Result<F> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
}
