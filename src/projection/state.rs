//! Running state carried from one projection month to the next

use rust_decimal::Decimal;

use crate::config::ResolvedParameters;
use crate::error::{ProjectionError, ProjectionResultOf};

/// Values of one stepped month before any analytics are attached
#[derive(Debug, Clone)]
pub struct MonthStep {
    pub month: u32,

    /// Rate applied this step, as a fraction
    pub rate: Decimal,

    /// Contribution added at the start of the step
    pub contribution: Decimal,

    /// Ending principal of the previous month
    pub prior_ending_principal: Decimal,

    /// Post-contribution, pre-return
    pub starting_principal: Decimal,

    pub monthly_return: Decimal,
    pub monthly_fee: Decimal,

    /// Post-fee
    pub ending_principal: Decimal,

    pub value_without_fees: Decimal,
    pub cumulative_fees: Decimal,
    pub cumulative_contributions: Decimal,
}

/// State of the investment between steps
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Last completed month (0 before the first step)
    pub month: u32,

    pub ending_principal: Decimal,

    /// Fee-free shadow balance
    pub value_without_fees: Decimal,

    pub cumulative_fees: Decimal,

    /// Starting principal plus every contribution so far
    pub cumulative_contributions: Decimal,
}

impl ProjectionState {
    /// State at month 0
    pub fn initial(params: &ResolvedParameters) -> Self {
        Self {
            month: 0,
            ending_principal: params.starting_principal,
            value_without_fees: params.starting_principal,
            cumulative_fees: Decimal::ZERO,
            cumulative_contributions: params.starting_principal,
        }
    }

    /// Advance one month: contribute, apply the return, then charge fees
    ///
    /// The order is fixed; fees are charged on principal after returns and the
    /// individual fees are summed, never compounded against each other.
    pub fn advance(&mut self, params: &ResolvedParameters) -> ProjectionResultOf<MonthStep> {
        let month = self.month + 1;
        let overflow = |quantity| ProjectionError::Overflow { month, quantity };
        let contribution = params.effective_contribution();
        let prior_ending_principal = self.ending_principal;

        let starting_principal = prior_ending_principal
            .checked_add(contribution)
            .ok_or_else(|| overflow("starting principal"))?;
        let cumulative_contributions = self
            .cumulative_contributions
            .checked_add(contribution)
            .ok_or_else(|| overflow("cumulative contributions"))?;

        let rate = params.rate_for_month(month);
        let monthly_return = starting_principal
            .checked_mul(rate)
            .ok_or_else(|| overflow("monthly return"))?;
        let after_returns = starting_principal
            .checked_add(monthly_return)
            .ok_or_else(|| overflow("principal after returns"))?;

        let monthly_fee = params
            .total_fee(after_returns)
            .ok_or_else(|| overflow("monthly fee"))?;
        let ending_principal = after_returns
            .checked_sub(monthly_fee)
            .ok_or_else(|| overflow("ending principal"))?;
        let cumulative_fees = self
            .cumulative_fees
            .checked_add(monthly_fee)
            .ok_or_else(|| overflow("cumulative fees"))?;

        let value_without_fees = self
            .value_without_fees
            .checked_add(contribution)
            .and_then(|shadow| shadow.checked_add(shadow.checked_mul(rate)?))
            .ok_or_else(|| overflow("value without fees"))?;

        self.month = month;
        self.ending_principal = ending_principal;
        self.value_without_fees = value_without_fees;
        self.cumulative_fees = cumulative_fees;
        self.cumulative_contributions = cumulative_contributions;

        Ok(MonthStep {
            month,
            rate,
            contribution,
            prior_ending_principal,
            starting_principal,
            monthly_return,
            monthly_fee,
            ending_principal,
            value_without_fees,
            cumulative_fees,
            cumulative_contributions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Fee, GlobalParameters, ProjectionConfig, ReturnOverride, Returns};
    use rust_decimal_macros::dec;

    fn params(config: ProjectionConfig) -> ResolvedParameters {
        ResolvedParameters::resolve(&config).unwrap()
    }

    fn hundred() -> GlobalParameters {
        GlobalParameters {
            starting_principal: dec!(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_fee_after_zero_return() {
        let p = params(ProjectionConfig::new(hundred()).with_fee(Fee::annual("fee", dec!(0.12))));
        let mut state = ProjectionState::initial(&p);
        let step = state.advance(&p).unwrap();

        assert_eq!(step.monthly_fee, dec!(1.00));
        assert_eq!(step.ending_principal, dec!(99.00));
        assert_eq!(step.value_without_fees, dec!(100));
    }

    #[test]
    fn test_fee_charged_on_post_return_principal() {
        let p = params(
            ProjectionConfig::new(hundred())
                .with_returns(Returns::annual(dec!(0.12)))
                .with_fee(Fee::annual("fee", dec!(0.12))),
        );
        let mut state = ProjectionState::initial(&p);
        let step = state.advance(&p).unwrap();

        assert_eq!(step.monthly_return, dec!(1.00));
        assert_eq!(step.monthly_fee, dec!(1.01));
        assert_eq!(step.ending_principal, dec!(99.99));
        assert_eq!(step.value_without_fees, dec!(101));
    }

    #[test]
    fn test_multiple_fees_are_summed() {
        let p = params(
            ProjectionConfig::new(hundred())
                .with_fee(Fee::annual("a", dec!(0.06)))
                .with_fee(Fee::annual("b", dec!(0.06))),
        );
        let mut state = ProjectionState::initial(&p);
        assert_eq!(state.advance(&p).unwrap().monthly_fee, dec!(1.00));
    }

    #[test]
    fn test_contribution_before_return() {
        let global = GlobalParameters {
            monthly_contribution: dec!(100),
            ..hundred()
        };
        let p = params(ProjectionConfig::new(global).with_returns(Returns::annual(dec!(0.12))));
        let mut state = ProjectionState::initial(&p);
        let step = state.advance(&p).unwrap();

        assert_eq!(step.starting_principal, dec!(200));
        assert_eq!(step.monthly_return, dec!(2.00));
        assert_eq!(step.cumulative_contributions, dec!(200));
    }

    #[test]
    fn test_force_zero_override() {
        let p = params(
            ProjectionConfig::new(hundred())
                .with_returns(Returns::annual(dec!(0.12)))
                .with_override(1, ReturnOverride::ForceZero),
        );
        let mut state = ProjectionState::initial(&p);
        let first = state.advance(&p).unwrap();
        let second = state.advance(&p).unwrap();

        assert_eq!(first.monthly_return, Decimal::ZERO);
        assert_eq!(second.monthly_return, dec!(1.00));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let global = GlobalParameters {
            starting_principal: Decimal::MAX / dec!(2),
            ..Default::default()
        };
        let p = params(ProjectionConfig::new(global).with_returns(Returns::annual(dec!(36))));
        let mut state = ProjectionState::initial(&p);

        let err = state.advance(&p).unwrap_err();
        assert!(matches!(err, ProjectionError::Overflow { month: 1, .. }));
        assert_eq!(state.month, 0);
    }
}
