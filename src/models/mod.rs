//! Data models for option chains and density estimation
//!
//! This module contains data structures for representing option quotes,
//! market context, and risk-neutral density results.

mod density;
mod market;
mod option;

pub use density::*;
pub use market::*;
pub use option::*;
