//! Core projection engine for monthly investment projections

use log::{debug, trace, warn};

use super::metrics::ReturnMetrics;
use super::mwrr::money_weighted_return;
use super::rows::{ProjectionResult, ProjectionRow};
use super::state::{MonthStep, ProjectionState};
use super::twrr::time_weighted_return;
use crate::config::{ProjectionConfig, ResolvedParameters};
use crate::error::{ProjectionError, ProjectionResultOf};

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    params: ResolvedParameters,
    currency: String,
}

impl ProjectionEngine {
    /// Validate the configuration and resolve the run parameters
    pub fn new(config: &ProjectionConfig) -> ProjectionResultOf<Self> {
        Ok(Self {
            params: ResolvedParameters::resolve(config)?,
            currency: config.global.currency.clone(),
        })
    }

    pub fn params(&self) -> &ResolvedParameters {
        &self.params
    }

    /// Run the projection for months 0..=N
    ///
    /// Fails with [`ProjectionError::Overflow`] when a balance or ratio leaves
    /// the `Decimal` range; no partial result is returned.
    pub fn project(&self) -> ProjectionResultOf<ProjectionResult> {
        let month_count = self.params.month_count;
        debug!(
            "Projecting {} months from {} (principal {}, contribution {}, {} fees)",
            month_count,
            self.params.start_date,
            self.params.starting_principal,
            self.params.monthly_contribution,
            self.params.fees.len()
        );

        let mut rows = Vec::with_capacity(month_count as usize + 1);
        rows.push(ProjectionRow::identity(&self.params));

        let mut state = ProjectionState::initial(&self.params);
        for _month in 1..=month_count {
            let step = state.advance(&self.params)?;
            let row = self.finalize_month(&rows, step)?;
            rows.push(row);
        }

        let result = ProjectionResult::new(self.currency.clone(), rows);
        if let Some(last) = result.final_row() {
            debug!(
                "Projection complete: ending principal {}, TWRR {}%, MWRR {}%",
                last.ending_principal, last.twrr, last.mwrr
            );
        }
        Ok(result)
    }

    /// Attach analytics to a stepped month and build its final row
    ///
    /// `committed` holds rows 0..m-1 only; the step itself is not yet in the
    /// sequence.
    fn finalize_month(
        &self,
        committed: &[ProjectionRow],
        step: MonthStep,
    ) -> ProjectionResultOf<ProjectionRow> {
        let month = step.month;
        let overflow = |quantity| ProjectionError::Overflow { month, quantity };
        let metrics = ReturnMetrics::from_step(&step)?;
        let twrr = time_weighted_return(committed, &step)
            .ok_or_else(|| overflow("time-weighted return"))?;
        let mwrr = money_weighted_return(&self.params, &step)
            .ok_or_else(|| overflow("money-weighted return"))?;

        if !mwrr.converged {
            warn!(
                "MWRR did not converge for month {}; reporting last estimate {}%",
                step.month, mwrr.rate_pct
            );
        }

        trace!(
            "Month {}: start {} return {} fee {} end {}",
            step.month,
            step.starting_principal,
            step.monthly_return,
            step.monthly_fee,
            step.ending_principal
        );

        let date = self.params.month_date(step.month);
        Ok(ProjectionRow::from_step(step, date, metrics, twrr, mwrr))
    }
}

/// Validate `config` and run the full projection
pub fn calculate(config: &ProjectionConfig) -> ProjectionResultOf<ProjectionResult> {
    ProjectionEngine::new(config)?.project()
}
