//! Configuration data structures supplied by the surrounding application

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit a rate is quoted in (display only, the divisor is `applied_time_unit`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Month,
    Quarter,
    #[default]
    Year,
}

fn default_applied_time_unit() -> u32 {
    12
}

/// A recurring fee charged on principal after returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Classification tag, e.g. "management" or "custody"
    #[serde(default)]
    pub fee_type: String,

    /// Quoted rate as a fraction (0.012 = 1.2%)
    pub value: Decimal,

    #[serde(default)]
    pub quote_time_unit: TimeUnit,

    /// Number of steps the quoted rate is spread over (12 turns an annual rate monthly)
    #[serde(default = "default_applied_time_unit")]
    pub applied_time_unit: u32,
}

impl Fee {
    /// Annual fee quoted as a fraction, charged monthly
    pub fn annual(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fee_type: String::new(),
            value,
            quote_time_unit: TimeUnit::Year,
            applied_time_unit: 12,
        }
    }

    /// Fee charged on `principal` for one step, `None` on overflow
    pub fn charge(&self, principal: Decimal) -> Option<Decimal> {
        principal
            .checked_mul(self.value)?
            .checked_div(Decimal::from(self.applied_time_unit))
    }
}

/// Default growth assumption, same shape as a fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Returns {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Quoted rate as a fraction (0.07 = 7%)
    pub value: Decimal,

    #[serde(default)]
    pub quote_time_unit: TimeUnit,

    #[serde(default = "default_applied_time_unit")]
    pub applied_time_unit: u32,
}

impl Returns {
    /// Annual return quoted as a fraction, applied monthly
    pub fn annual(value: Decimal) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            value,
            quote_time_unit: TimeUnit::Year,
            applied_time_unit: 12,
        }
    }
}

impl Default for Returns {
    fn default() -> Self {
        Self::annual(Decimal::ZERO)
    }
}

/// Per-month replacement of the default return rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnOverride {
    /// Explicit rate for the month, expressed as a percentage
    Explicit { rate_pct: Decimal },
    /// No return at all this month regardless of the default
    ForceZero,
}

impl ReturnOverride {
    /// Rate as a fraction
    pub fn rate(&self) -> Decimal {
        match self {
            ReturnOverride::Explicit { rate_pct } => *rate_pct / dec!(100),
            ReturnOverride::ForceZero => Decimal::ZERO,
        }
    }
}

/// Amounts and horizon shared by the whole projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalParameters {
    pub starting_principal: Decimal,

    #[serde(default)]
    pub monthly_contribution: Decimal,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Explicit horizon; when > 0 it wins over the date span
    #[serde(default)]
    pub num_months: u32,

    /// Display only, no conversion is performed
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for GlobalParameters {
    fn default() -> Self {
        let start_date = NaiveDate::default();
        Self {
            starting_principal: dec!(10000),
            monthly_contribution: Decimal::ZERO,
            start_date,
            end_date: start_date,
            num_months: 12,
            currency: default_currency(),
        }
    }
}

/// Complete input to a projection run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub global: GlobalParameters,

    #[serde(default)]
    pub returns: Returns,

    #[serde(default)]
    pub fees: Vec<Fee>,

    /// Keyed by projection month (1-indexed)
    #[serde(default)]
    pub monthly_overrides: BTreeMap<u32, ReturnOverride>,
}

impl ProjectionConfig {
    /// Configuration with the given global parameters and no returns, fees or overrides
    pub fn new(global: GlobalParameters) -> Self {
        Self {
            global,
            ..Default::default()
        }
    }

    pub fn with_returns(mut self, returns: Returns) -> Self {
        self.returns = returns;
        self
    }

    pub fn with_fee(mut self, fee: Fee) -> Self {
        self.fees.push(fee);
        self
    }

    pub fn with_override(mut self, month: u32, over: ReturnOverride) -> Self {
        self.monthly_overrides.insert(month, over);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_rates() {
        let explicit = ReturnOverride::Explicit { rate_pct: dec!(2.5) };
        assert_eq!(explicit.rate(), dec!(0.025));
        assert_eq!(ReturnOverride::ForceZero.rate(), Decimal::ZERO);
    }

    #[test]
    fn test_fee_charge() {
        let fee = Fee::annual("management", dec!(0.12));
        assert_eq!(fee.charge(dec!(101)), Some(dec!(1.01)));
        assert_eq!(Fee::annual("steep", dec!(24)).charge(Decimal::MAX), None);
    }

    #[test]
    fn test_builder_does_not_share_state() {
        let a = ProjectionConfig::default().with_fee(Fee::annual("a", dec!(0.01)));
        let b = ProjectionConfig::default();
        assert_eq!(a.fees.len(), 1);
        assert!(b.fees.is_empty());
    }
}
