//! Money-weighted return: IRR of the contribution schedule against the balance

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::irr::CashFlowSchedule;
use super::metrics::growth_pct;
use super::state::MonthStep;
use crate::config::ResolvedParameters;

/// MWRR for one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MwrrEstimate {
    /// Annual-basis percentage (365.25-day years)
    pub rate_pct: Decimal,
    pub converged: bool,
}

/// Dated flows up to `month`, valued at `ending_principal`
///
/// The starting principal goes in at the start date, each step's contribution
/// at the start of its step, and the balance comes out at the month's date.
pub fn cash_flow_schedule(
    params: &ResolvedParameters,
    month: u32,
    ending_principal: Decimal,
) -> CashFlowSchedule {
    let contribution = params.effective_contribution();
    let mut schedule = CashFlowSchedule::with_capacity(month as usize + 2);

    schedule.push(params.start_date, -params.starting_principal);
    if !contribution.is_zero() {
        for step in 1..=month {
            schedule.push(params.month_date(step - 1), -contribution);
        }
    }
    schedule.push(params.month_date(month), ending_principal);

    schedule
}

/// MWRR through the month in `step`
///
/// Without contributions there is a single flow in and out, so the result is
/// the plain growth of the starting principal and no root-find is needed.
///
/// `None` only when the shortcut ratio overflows.
pub fn money_weighted_return(
    params: &ResolvedParameters,
    step: &MonthStep,
) -> Option<MwrrEstimate> {
    if params.effective_contribution().is_zero() {
        return Some(MwrrEstimate {
            rate_pct: growth_pct(step.ending_principal, params.starting_principal)?,
            converged: true,
        });
    }

    let solution = cash_flow_schedule(params, step.month, step.ending_principal).solve();
    let rate_pct = Decimal::from_f64(solution.rate * 100.0)
        .map(|r| r.round_dp(10))
        .unwrap_or_default();

    Some(MwrrEstimate {
        rate_pct,
        converged: solution.converged,
    })
}
