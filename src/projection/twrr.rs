//! Time-weighted return: geometric linking of per-period returns

use std::iter;

use rust_decimal::Decimal;

use super::metrics::{growth_pct, HUNDRED};
use super::rows::ProjectionRow;
use super::state::MonthStep;

/// Return of one period measured against its post-contribution base, in percent
///
/// The contribution is in the base, so it earns the period's return and fee
/// without showing up as performance. A zero base is a zero return. `None` on
/// overflow.
pub fn period_return_pct(base_value: Decimal, end_value: Decimal) -> Option<Decimal> {
    growth_pct(end_value, base_value)
}

/// Link percentage period returns: `(Π(1 + r/100) - 1) * 100`
///
/// `None` when the running product leaves the `Decimal` range.
pub fn link_returns<I>(period_returns_pct: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let cumulative = period_returns_pct
        .into_iter()
        .try_fold(Decimal::ONE, |acc, r| {
            acc.checked_mul(Decimal::ONE.checked_add(r.checked_div(HUNDRED)?)?)
        })?;
    cumulative.checked_sub(Decimal::ONE)?.checked_mul(HUNDRED)
}

/// TWRR through the month in `current`
///
/// `committed` holds rows 0..m-1; the current month is taken from the
/// transient step, which has not been placed in the sequence yet. Row 0 is
/// the identity row and contributes no period.
pub fn time_weighted_return(committed: &[ProjectionRow], current: &MonthStep) -> Option<Decimal> {
    let periods = committed
        .iter()
        .skip(1)
        .map(|row| (row.starting_principal, row.ending_principal))
        .chain(iter::once((current.starting_principal, current.ending_principal)));

    let returns = periods
        .map(|(base, end)| period_return_pct(base, end))
        .collect::<Option<Vec<_>>>()?;
    link_returns(returns)
}
