//! Row output structures for projections

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::metrics::ReturnMetrics;
use super::mwrr::MwrrEstimate;
use super::state::MonthStep;
use crate::config::ResolvedParameters;

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    // Timing
    pub month: u32,
    pub date: NaiveDate,

    // Balances
    pub starting_principal: Decimal,
    pub ending_principal: Decimal,
    pub value_without_fees: Decimal,

    // Flows
    pub contribution: Decimal,
    pub return_rate: Decimal,
    pub monthly_return: Decimal,
    pub monthly_fee: Decimal,

    // Accumulators
    pub cumulative_fees: Decimal,
    pub cumulative_contributions: Decimal,

    // Rate metrics (percentages)
    pub fees_percentage: Decimal,
    pub mom_gross_return_rate: Decimal,
    pub total_gross_return_rate: Decimal,
    pub mom_net_return_rate: Decimal,
    pub mom_net_excl_contrib_return_rate: Decimal,
    pub total_net_return_rate: Decimal,

    /// Cumulative time-weighted return through this month, in percent
    pub twrr: Decimal,

    /// Money-weighted return through this month, as an annual-basis percentage
    ///
    /// Flows are timed in 365.25-day years, so this is a per-year rate and not
    /// a monthly-equivalent one. Without contributions it equals the total net
    /// return.
    pub mwrr: Decimal,

    /// False when the IRR solver stopped without meeting its tolerance
    pub mwrr_converged: bool,
}

impl ProjectionRow {
    /// Month 0: configured principal, every flow and rate zero
    pub fn identity(params: &ResolvedParameters) -> Self {
        let principal = params.starting_principal;
        Self {
            month: 0,
            date: params.start_date,
            starting_principal: principal,
            ending_principal: principal,
            value_without_fees: principal,
            contribution: Decimal::ZERO,
            return_rate: Decimal::ZERO,
            monthly_return: Decimal::ZERO,
            monthly_fee: Decimal::ZERO,
            cumulative_fees: Decimal::ZERO,
            cumulative_contributions: principal,
            fees_percentage: Decimal::ZERO,
            mom_gross_return_rate: Decimal::ZERO,
            total_gross_return_rate: Decimal::ZERO,
            mom_net_return_rate: Decimal::ZERO,
            mom_net_excl_contrib_return_rate: Decimal::ZERO,
            total_net_return_rate: Decimal::ZERO,
            twrr: Decimal::ZERO,
            mwrr: Decimal::ZERO,
            mwrr_converged: true,
        }
    }

    /// Final row for a stepped month, built once all analytics are known
    pub fn from_step(
        step: MonthStep,
        date: NaiveDate,
        metrics: ReturnMetrics,
        twrr: Decimal,
        mwrr: MwrrEstimate,
    ) -> Self {
        Self {
            month: step.month,
            date,
            starting_principal: step.starting_principal,
            ending_principal: step.ending_principal,
            value_without_fees: step.value_without_fees,
            contribution: step.contribution,
            return_rate: step.rate,
            monthly_return: step.monthly_return,
            monthly_fee: step.monthly_fee,
            cumulative_fees: step.cumulative_fees,
            cumulative_contributions: step.cumulative_contributions,
            fees_percentage: metrics.fees_percentage,
            mom_gross_return_rate: metrics.mom_gross_return_rate,
            total_gross_return_rate: metrics.total_gross_return_rate,
            mom_net_return_rate: metrics.mom_net_return_rate,
            mom_net_excl_contrib_return_rate: metrics.mom_net_excl_contrib_return_rate,
            total_net_return_rate: metrics.total_net_return_rate,
            twrr,
            mwrr: mwrr.rate_pct,
            mwrr_converged: mwrr.converged,
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Display currency carried through from the configuration
    pub currency: String,

    /// Rows for months 0..=N
    rows: Vec<ProjectionRow>,
}

impl ProjectionResult {
    pub(crate) fn new(currency: String, rows: Vec<ProjectionRow>) -> Self {
        Self { currency, rows }
    }

    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ProjectionRow> {
        self.rows
    }

    /// Number of stepped months (rows minus the identity row)
    pub fn month_count(&self) -> u32 {
        self.rows.len().saturating_sub(1) as u32
    }

    pub fn final_row(&self) -> Option<&ProjectionRow> {
        self.rows.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_returns: Decimal = self.rows.iter().map(|r| r.monthly_return).sum();
        let last = self.rows.last();

        ProjectionSummary {
            total_months: self.month_count(),
            final_principal: last.map(|r| r.ending_principal).unwrap_or_default(),
            final_value_without_fees: last.map(|r| r.value_without_fees).unwrap_or_default(),
            total_contributions: last.map(|r| r.cumulative_contributions).unwrap_or_default(),
            total_fees: last.map(|r| r.cumulative_fees).unwrap_or_default(),
            total_returns,
            total_net_return_rate: last.map(|r| r.total_net_return_rate).unwrap_or_default(),
            final_twrr: last.map(|r| r.twrr).unwrap_or_default(),
            final_mwrr: last.map(|r| r.mwrr).unwrap_or_default(),
            mwrr_all_converged: self.rows.iter().all(|r| r.mwrr_converged),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_principal: Decimal,
    pub final_value_without_fees: Decimal,
    pub total_contributions: Decimal,
    pub total_fees: Decimal,
    pub total_returns: Decimal,
    pub total_net_return_rate: Decimal,
    pub final_twrr: Decimal,
    pub final_mwrr: Decimal,
    pub mwrr_all_converged: bool,
}
