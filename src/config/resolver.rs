//! Turns a raw configuration into simulation parameters

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::data::{Fee, ProjectionConfig, ReturnOverride};
use crate::error::{ProjectionError, ProjectionResultOf};

/// Upper bound on the projection horizon (100 years)
pub const MAX_PROJECTION_MONTHS: u32 = 1200;

/// Months between two dates counting calendar months only (day of month ignored)
pub fn month_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end.year() as i64 - start.year() as i64) * 12 + (end.month() as i64 - start.month() as i64)
}

/// Calendar date of projection month `month`, day clamped to the month end
pub fn month_date(start: NaiveDate, month: u32) -> NaiveDate {
    start
        .checked_add_months(Months::new(month))
        .unwrap_or(NaiveDate::MAX)
}

/// Parameters derived once per run
#[derive(Debug, Clone)]
pub struct ResolvedParameters {
    /// Number of stepped months (rows = month_count + 1)
    pub month_count: u32,

    /// Rate used when a month has no override
    pub default_monthly_rate: Decimal,

    pub starting_principal: Decimal,
    pub monthly_contribution: Decimal,
    pub start_date: NaiveDate,
    pub fees: Vec<Fee>,
    overrides: BTreeMap<u32, ReturnOverride>,
}

impl ResolvedParameters {
    /// Validate `config` and derive the run parameters
    pub fn resolve(config: &ProjectionConfig) -> ProjectionResultOf<Self> {
        config.validate()?;

        let global = &config.global;
        let month_count =
            resolve_month_count(global.num_months, global.start_date, global.end_date);
        if month_count > MAX_PROJECTION_MONTHS {
            return Err(ProjectionError::InvalidConfig(format!(
                "projection of {} months exceeds the {} month limit",
                month_count, MAX_PROJECTION_MONTHS
            )));
        }
        if global.start_date.checked_add_months(Months::new(month_count)).is_none() {
            return Err(ProjectionError::InvalidConfig(format!(
                "start date {} plus {} months is out of range",
                global.start_date, month_count
            )));
        }

        let returns = &config.returns;
        let default_monthly_rate = returns.value / Decimal::from(returns.applied_time_unit);

        Ok(Self {
            month_count,
            default_monthly_rate,
            starting_principal: global.starting_principal,
            monthly_contribution: global.monthly_contribution,
            start_date: global.start_date,
            fees: config.fees.clone(),
            overrides: config.monthly_overrides.clone(),
        })
    }

    /// Return rate (as a fraction) applied in `month`
    pub fn rate_for_month(&self, month: u32) -> Decimal {
        match self.overrides.get(&month) {
            Some(over) => over.rate(),
            None => self.default_monthly_rate,
        }
    }

    /// Contribution actually added at the start of a step
    pub fn effective_contribution(&self) -> Decimal {
        if self.monthly_contribution > Decimal::ZERO {
            self.monthly_contribution
        } else {
            Decimal::ZERO
        }
    }

    /// Sum of every fee charged on `principal` for one step, `None` on overflow
    pub fn total_fee(&self, principal: Decimal) -> Option<Decimal> {
        self.fees
            .iter()
            .try_fold(Decimal::ZERO, |total, fee| total.checked_add(fee.charge(principal)?))
    }

    pub fn month_date(&self, month: u32) -> NaiveDate {
        month_date(self.start_date, month)
    }
}

/// Explicit month count wins; otherwise the calendar span, floored at zero
pub fn resolve_month_count(num_months: u32, start: NaiveDate, end: NaiveDate) -> u32 {
    if num_months > 0 {
        return num_months;
    }
    let span = month_span(start, end);
    if span <= 0 {
        0
    } else {
        u32::try_from(span).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GlobalParameters, Returns};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_explicit_month_count_wins() {
        assert_eq!(resolve_month_count(7, date(2020, 1, 1), date(2030, 1, 1)), 7);
    }

    #[test]
    fn test_month_count_from_dates() {
        assert_eq!(resolve_month_count(0, date(2020, 3, 15), date(2021, 1, 2)), 10);
        assert_eq!(resolve_month_count(0, date(2020, 3, 1), date(2020, 3, 31)), 0);
        assert_eq!(resolve_month_count(0, date(2021, 1, 1), date(2020, 1, 1)), 0);
    }

    #[test]
    fn test_month_date_clamps_to_month_end() {
        assert_eq!(month_date(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(month_date(date(2024, 1, 31), 0), date(2024, 1, 31));
    }

    #[test]
    fn test_default_rate_and_overrides() {
        let config = ProjectionConfig::new(GlobalParameters::default())
            .with_returns(Returns::annual(dec!(0.06)))
            .with_override(2, ReturnOverride::Explicit { rate_pct: dec!(-3) })
            .with_override(3, ReturnOverride::ForceZero);
        let params = ResolvedParameters::resolve(&config).unwrap();

        assert_eq!(params.default_monthly_rate, dec!(0.005));
        assert_eq!(params.rate_for_month(1), dec!(0.005));
        assert_eq!(params.rate_for_month(2), dec!(-0.03));
        assert_eq!(params.rate_for_month(3), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_excessive_horizon() {
        let global = GlobalParameters {
            num_months: MAX_PROJECTION_MONTHS + 1,
            ..Default::default()
        };
        let result = ResolvedParameters::resolve(&ProjectionConfig::new(global));
        assert!(matches!(result, Err(ProjectionError::InvalidConfig(_))));
    }
}
