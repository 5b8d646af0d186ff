//! Investment Projection - month-by-month projection of a contributed, fee-bearing investment
//!
//! This library provides:
//! - A month stepper applying contribution, return and fees in a fixed order
//! - Simple gross/net monthly and total return metrics
//! - Time-weighted (TWRR) and money-weighted (MWRR/IRR) returns
//! - Parallel batch runs over many configurations
//!
//! All money and rate values are exact `rust_decimal::Decimal`; only the IRR
//! root-find works in `f64`.

pub mod config;
pub mod error;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use config::{Fee, GlobalParameters, ProjectionConfig, ReturnOverride, Returns, TimeUnit};
pub use error::ProjectionError;
pub use projection::{
    calculate, ProjectionEngine, ProjectionResult, ProjectionRow, ProjectionSummary,
};
pub use scenario::ScenarioRunner;
