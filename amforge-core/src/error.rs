use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmforgeError {
    #[error("Parameter '{key}' must be {requirement}, got {value}")]
    InvalidParameter {
        key: &'static str,
        value: f64,
        requirement: &'static str,
    },

    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("Could not parse value '{value}' for parameter '{key}'")]
    UnparsableValue { key: String, value: String },

    #[error("Country '{0}' not found in grid catalog")]
    CountryNotFound(String),

    #[error("Country '{0}' appears more than once in grid catalog")]
    DuplicateCountry(String),

    #[error("Grid emission factor for '{0}' must be non-negative, got {1}")]
    NegativeGridFactor(String, f64),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write JSON: {0}")]
    JsonWriting(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
