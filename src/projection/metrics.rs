//! Simple return-rate metrics derived from a single stepped month

use rust_decimal::Decimal;

use super::state::MonthStep;
use crate::error::{ProjectionError, ProjectionResultOf};

pub(crate) const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// `(numerator / denominator - 1) * 100`, zero when the denominator is zero
///
/// `None` when the ratio does not fit in a `Decimal`.
pub fn growth_pct(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return Some(Decimal::ZERO);
    }
    numerator
        .checked_div(denominator)?
        .checked_sub(Decimal::ONE)?
        .checked_mul(HUNDRED)
}

/// `numerator / denominator * 100`, zero when the denominator is zero
pub fn share_pct(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        return Some(Decimal::ZERO);
    }
    numerator.checked_div(denominator)?.checked_mul(HUNDRED)
}

/// Percentage metrics that need no iteration over earlier months
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnMetrics {
    /// Fee as a share of the post-contribution starting principal
    pub fees_percentage: Decimal,
    pub mom_gross_return_rate: Decimal,
    pub total_gross_return_rate: Decimal,

    /// Ending over post-contribution starting principal; also the TWRR period return
    pub mom_net_return_rate: Decimal,
    pub mom_net_excl_contrib_return_rate: Decimal,
    pub total_net_return_rate: Decimal,
}

impl ReturnMetrics {
    pub fn from_step(step: &MonthStep) -> ProjectionResultOf<Self> {
        let check = |value: Option<Decimal>, quantity| {
            value.ok_or(ProjectionError::Overflow {
                month: step.month,
                quantity,
            })
        };

        Ok(Self {
            fees_percentage: check(
                share_pct(step.monthly_fee, step.starting_principal),
                "fees percentage",
            )?,
            mom_gross_return_rate: check(step.rate.checked_mul(HUNDRED), "gross monthly return")?,
            total_gross_return_rate: check(
                growth_pct(step.value_without_fees, step.cumulative_contributions),
                "total gross return",
            )?,
            mom_net_return_rate: check(
                growth_pct(step.ending_principal, step.starting_principal),
                "net monthly return",
            )?,
            mom_net_excl_contrib_return_rate: check(
                growth_pct(step.ending_principal, step.prior_ending_principal),
                "net monthly return excluding contributions",
            )?,
            total_net_return_rate: check(
                growth_pct(step.ending_principal, step.cumulative_contributions),
                "total net return",
            )?,
        })
    }
}
