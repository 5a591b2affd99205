//! # density-rs
//!
//! Risk-neutral density estimation from option-chain quotes.
//!
//! The crate turns raw call-option quotes for one observation date into the
//! market-implied probability density of the underlying's price at maturity
//! (Breeden-Litzenberger):
//!
//! 1. clean and decimate the raw chain, keeping positive mid-prices
//! 2. invert Black-Scholes per quote for implied volatility
//! 3. fit a cubic vol smile across strikes and reprice a unit-step grid
//! 4. take the discounted second strike-derivative of the call curve
//!
//! Data loading and plotting live outside the crate; callers hand in an
//! [`OptionChain`] and a [`MarketContext`] per date and plot the returned
//! [`DensityResult`] directly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use density_rs::config::{CleanerConfig, DensityConfig};
//! use density_rs::models::{MarketContext, OptionChain, OptionQuote};
//! use density_rs::pipeline::compute_density;
//!
//! fn main() -> density_rs::error::Result<()> {
//!     let config = DensityConfig::new(CleanerConfig {
//!         lower_strike: 5000.0,
//!         upper_strike: 6000.0,
//!         skip_stride: 15,
//!     });
//!     config.init_logging()?;
//!
//!     // Quotes and the close price come from the caller's data layer.
//!     let chain = OptionChain::new(vec![
//!         OptionQuote::new(5400.0, 120.0, 121.5),
//!         OptionQuote::new(5500.0, 60.0, 61.0),
//!         // ...
//!     ]);
//!     let market = MarketContext::new(
//!         5455.0,
//!         NaiveDate::from_ymd_opt(2025, 4, 8).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
//!         None,
//!     )?;
//!
//!     let density = compute_density(&config, &chain, &market)?;
//!     for (strike, pdf) in density.strikes.iter().zip(&density.pdf) {
//!         println!("{strike} {pdf}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use config::{CleanerConfig, DensityConfig};
pub use error::{DensityError, Result};
pub use models::{DensityResult, ImpliedVolPoint, MarketContext, OptionChain, OptionQuote};
pub use pipeline::compute_density;
