//! Error types for projection runs

use thiserror::Error;

/// Result alias used across the crate
pub type ProjectionResultOf<T> = Result<T, ProjectionError>;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Configuration rejected before any month is stepped
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cash-flow amounts and dates handed to the IRR helper differ in length
    #[error("Cash-flow schedule mismatch: {amounts} amounts but {dates} dates")]
    ScheduleMismatch { amounts: usize, dates: usize },

    /// A value left the range of `Decimal` while stepping a month
    #[error("Numerical overflow in month {month} computing {quantity}")]
    Overflow { month: u32, quantity: &'static str },

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
