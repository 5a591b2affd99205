use thiserror::Error;

/// Custom error types for the density-rs library
#[derive(Error, Debug)]
pub enum DensityError {
    #[error("Data quality error: {0}")]
    DataQuality(String),

    #[error("Implied vol solver failed for strike {strike} (last estimate {last_vol})")]
    SolverFailure { strike: f64, last_vol: f64 },

    #[error("Interpolation error: {0}")]
    Interpolation(String),

    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, DensityError>;
