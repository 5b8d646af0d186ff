//! Projection engine: month stepper plus return analytics

mod state;
mod engine;
mod rows;
mod metrics;
mod twrr;
mod mwrr;
pub mod irr;

pub use state::{MonthStep, ProjectionState};
pub use engine::{calculate, ProjectionEngine};
pub use rows::{ProjectionRow, ProjectionResult, ProjectionSummary};
pub use metrics::{growth_pct, share_pct, ReturnMetrics};
pub use twrr::{link_returns, period_return_pct, time_weighted_return};
pub use mwrr::{cash_flow_schedule, money_weighted_return, MwrrEstimate};
pub use irr::{irr_from_parts, CashFlow, CashFlowSchedule, IrrSolution};
