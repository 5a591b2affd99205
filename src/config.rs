use serde::Deserialize;

use crate::error::{DensityError, Result};
use crate::utils::black_scholes::IvSolverConfig;

/// Configuration for option-chain cleaning
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CleanerConfig {
    /// Lower edge of the strike band considered densely quoted
    pub lower_strike: f64,
    /// Upper edge of the strike band considered densely quoted
    pub upper_strike: f64,
    /// Keep every Nth quote inside the dense band
    pub skip_stride: usize,
}

/// Configuration for one density computation
#[derive(Debug, Clone, Deserialize)]
pub struct DensityConfig {
    /// Option-chain cleaning parameters
    pub cleaner: CleanerConfig,
    /// Implied-vol solver parameters
    #[serde(skip, default)]
    pub solver: IvSolverConfig,
    /// Log level used by [`DensityConfig::init_logging`]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DensityConfig {
    pub fn new(cleaner: CleanerConfig) -> Self {
        Self {
            cleaner,
            solver: IvSolverConfig::default(),
            log_level: default_log_level(),
        }
    }

    /// Reject settings the pipeline cannot run with.
    ///
    /// An inverted strike band is allowed (the dense set is simply empty),
    /// but a zero stride would retain nothing deterministically and the
    /// solver bounds must form a positive interval.
    pub fn validate(&self) -> Result<()> {
        if self.cleaner.skip_stride == 0 {
            return Err(DensityError::ConfigError(
                "skip_stride must be at least 1".to_string(),
            ));
        }
        if !(self.solver.min_vol > 0.0) || self.solver.max_vol <= self.solver.min_vol {
            return Err(DensityError::ConfigError(format!(
                "invalid solver vol bounds [{}, {}]",
                self.solver.min_vol, self.solver.max_vol
            )));
        }
        Ok(())
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();

        Ok(())
    }
}
