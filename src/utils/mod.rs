//! Numerical utilities: pricing, implied-vol inversion, interpolation,
//! and density extraction.

pub mod black_scholes;
pub mod probability;
pub mod spline;

pub use black_scholes::{batch_implied_vol, call_price, call_prices, implied_vol, IvSolverConfig};
pub use probability::estimate_density;
pub use spline::CubicSpline;
