//! Scenario runner for batch projections
//!
//! Each projection is a pure function of its configuration, so batches run in
//! parallel with every worker owning its own configuration and result.

use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::config::{ProjectionConfig, Returns};
use crate::error::ProjectionResultOf;
use crate::projection::{calculate, ProjectionResult};

/// Runner holding a base configuration to derive scenarios from
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(base_config);
///
/// // Same investment under different annual returns
/// let results = runner.run_return_sensitivities(&[dec!(0.03), dec!(0.05), dec!(0.07)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(base: ProjectionConfig) -> Self {
        Self { base }
    }

    /// Run the base configuration
    pub fn run(&self) -> ProjectionResultOf<ProjectionResult> {
        calculate(&self.base)
    }

    /// Run many independent configurations in parallel, results in input order
    pub fn run_batch(configs: &[ProjectionConfig]) -> Vec<ProjectionResultOf<ProjectionResult>> {
        configs.par_iter().map(calculate).collect()
    }

    /// Run the base configuration once per annual return rate
    ///
    /// Each variant keeps the base fees and overrides; only the default return
    /// is replaced.
    pub fn run_return_sensitivities(
        &self,
        annual_rates: &[Decimal],
    ) -> Vec<(Decimal, ProjectionResultOf<ProjectionResult>)> {
        let configs: Vec<ProjectionConfig> = annual_rates
            .iter()
            .map(|&rate| {
                let returns = Returns {
                    value: rate,
                    ..self.base.returns.clone()
                };
                self.base.clone().with_returns(returns)
            })
            .collect();

        log::debug!("Running {} return sensitivities", configs.len());

        annual_rates
            .iter()
            .copied()
            .zip(Self::run_batch(&configs))
            .collect()
    }

    pub fn base(&self) -> &ProjectionConfig {
        &self.base
    }
}
