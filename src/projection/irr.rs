//! Internal Rate of Return (IRR) over dated cash flows
//!
//! Used to calculate the money-weighted return of a projection

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{ProjectionError, ProjectionResultOf};

/// Days per year used to turn dates into year fractions
pub const DAYS_PER_YEAR: f64 = 365.25;

const INITIAL_GUESS: f64 = 0.10;
const TOLERANCE: f64 = 1e-7;
const MAX_ITERATIONS: u32 = 100;
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 100.0;

/// A single dated flow (negative = money in, positive = money out of the investment)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Ordered dated cash flows; year offsets are measured from the first flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

/// Outcome of a root-find
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    /// Rate per year as a decimal (0.05 = 5%)
    pub rate: f64,

    /// Whether the tolerance was met; otherwise `rate` is the last estimate
    pub converged: bool,

    pub iterations: u32,
}

impl CashFlowSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            flows: Vec::with_capacity(capacity),
        }
    }

    /// Build from parallel slices of amounts and dates
    pub fn from_parts(amounts: &[Decimal], dates: &[NaiveDate]) -> ProjectionResultOf<Self> {
        if amounts.len() != dates.len() {
            return Err(ProjectionError::ScheduleMismatch {
                amounts: amounts.len(),
                dates: dates.len(),
            });
        }
        Ok(Self {
            flows: dates
                .iter()
                .zip(amounts)
                .map(|(&date, &amount)| CashFlow { date, amount })
                .collect(),
        })
    }

    pub fn push(&mut self, date: NaiveDate, amount: Decimal) {
        self.flows.push(CashFlow { date, amount });
    }

    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// (amount, years since first flow) pairs in `f64`
    ///
    /// Amounts are rounded to 10 decimal places before leaving `Decimal`.
    fn time_points(&self) -> Vec<(f64, f64)> {
        let Some(first) = self.flows.first() else {
            return Vec::new();
        };
        self.flows
            .iter()
            .map(|cf| {
                let amount = cf.amount.round_dp(10).to_f64().unwrap_or(0.0);
                let years = (cf.date - first.date).num_days() as f64 / DAYS_PER_YEAR;
                (amount, years)
            })
            .collect()
    }

    /// Net present value at `rate`
    pub fn npv(&self, rate: f64) -> f64 {
        npv_and_derivative(&self.time_points(), rate).0
    }

    /// Solve for the rate that zeroes the NPV using Newton-Raphson
    ///
    /// Never fails: when the derivative vanishes or the iteration budget runs
    /// out, the last estimate is returned with `converged == false`.
    pub fn solve(&self) -> IrrSolution {
        let points = self.time_points();
        let mut rate = INITIAL_GUESS;

        for iteration in 0..MAX_ITERATIONS {
            let (npv, dnpv) = npv_and_derivative(&points, rate);

            if npv.abs() < TOLERANCE {
                return IrrSolution {
                    rate,
                    converged: true,
                    iterations: iteration,
                };
            }

            if dnpv.abs() < TOLERANCE {
                return IrrSolution {
                    rate,
                    converged: false,
                    iterations: iteration,
                };
            }

            let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

            if (new_rate - rate).abs() < TOLERANCE {
                return IrrSolution {
                    rate: new_rate,
                    converged: true,
                    iterations: iteration + 1,
                };
            }

            rate = new_rate;
        }

        IrrSolution {
            rate,
            converged: false,
            iterations: MAX_ITERATIONS,
        }
    }
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(points: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(cf, t) in points {
        npv += cf * base.powf(-t);
        if t != 0.0 {
            dnpv -= t * cf * base.powf(-t - 1.0);
        }
    }

    (npv, dnpv)
}

/// IRR of parallel amount/date slices
pub fn irr_from_parts(amounts: &[Decimal], dates: &[NaiveDate]) -> ProjectionResultOf<IrrSolution> {
    Ok(CashFlowSchedule::from_parts(amounts, dates)?.solve())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_simple_irr() {
        // 1000 in, 1100 out after 4 years of 365.25 days (1461 days)
        let mut schedule = CashFlowSchedule::new();
        schedule.push(date(2020, 1, 1), dec!(-1000));
        schedule.push(date(2024, 1, 1), dec!(1464.1));

        let solution = schedule.solve();
        assert!(solution.converged);
        assert_abs_diff_eq!(solution.rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_loss_irr() {
        let mut schedule = CashFlowSchedule::new();
        schedule.push(date(2020, 1, 1), dec!(-1000));
        schedule.push(date(2021, 1, 1), dec!(900));

        let solution = schedule.solve();
        assert!(solution.converged);
        assert!(solution.rate < 0.0);
        assert_abs_diff_eq!(schedule.npv(solution.rate), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_multiple_contributions_round_trip() {
        let amounts = [dec!(-500), dec!(-100), dec!(-100), dec!(-100), dec!(850)];
        let dates = [
            date(2024, 1, 1),
            date(2024, 1, 1),
            date(2024, 2, 1),
            date(2024, 3, 1),
            date(2024, 4, 1),
        ];
        let solution = irr_from_parts(&amounts, &dates).unwrap();
        let schedule = CashFlowSchedule::from_parts(&amounts, &dates).unwrap();

        assert!(solution.converged);
        assert!(solution.rate > 0.0);
        assert_abs_diff_eq!(schedule.npv(solution.rate), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mismatched_parts() {
        let result = irr_from_parts(&[dec!(-1), dec!(2)], &[date(2024, 1, 1)]);
        assert!(matches!(
            result,
            Err(ProjectionError::ScheduleMismatch { amounts: 2, dates: 1 })
        ));
    }

    #[test]
    fn test_flat_derivative_stops_unconverged() {
        // A single flow at t = 0 has no time decay to differentiate
        let mut schedule = CashFlowSchedule::new();
        schedule.push(date(2024, 1, 1), dec!(-100));

        let solution = schedule.solve();
        assert!(!solution.converged);
        assert_eq!(solution.rate, 0.10);
        assert_eq!(solution.iterations, 0);
    }
}
