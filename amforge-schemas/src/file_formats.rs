use crate::{grid::GridProfile, parameters::ProcessParameters};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterFile {
    pub schema_version: String,
    pub parameters: ProcessParameters,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridCatalogFile {
    pub schema_version: String,
    pub grids: Vec<GridProfile>,
}
