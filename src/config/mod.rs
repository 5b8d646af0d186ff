//! Projection configuration: fees, returns, overrides and global parameters

mod data;
mod resolver;
pub mod loader;

pub use data::{Fee, GlobalParameters, ProjectionConfig, ReturnOverride, Returns, TimeUnit};
pub use resolver::{
    month_date, month_span, resolve_month_count, ResolvedParameters, MAX_PROJECTION_MONTHS,
};
pub use loader::{load_config, parse_config};

use crate::error::{ProjectionError, ProjectionResultOf};
use rust_decimal::Decimal;

impl ProjectionConfig {
    /// Reject configurations the stepper cannot handle
    ///
    /// A zero starting principal together with a zero contribution leaves every
    /// ratio metric without a base, so it is refused here rather than producing
    /// meaningless rows.
    pub fn validate(&self) -> ProjectionResultOf<()> {
        let global = &self.global;

        if global.starting_principal < Decimal::ZERO {
            return Err(invalid(format!(
                "starting principal must not be negative (got {})",
                global.starting_principal
            )));
        }
        if global.monthly_contribution < Decimal::ZERO {
            return Err(invalid(format!(
                "monthly contribution must not be negative (got {})",
                global.monthly_contribution
            )));
        }
        if global.starting_principal.is_zero() && global.monthly_contribution.is_zero() {
            return Err(invalid(
                "starting principal and monthly contribution are both zero".to_string(),
            ));
        }

        if self.returns.applied_time_unit == 0 {
            return Err(invalid("returns applied_time_unit must be positive".to_string()));
        }

        for fee in &self.fees {
            if fee.applied_time_unit == 0 {
                return Err(invalid(format!(
                    "fee '{}' applied_time_unit must be positive",
                    fee.name
                )));
            }
            if fee.value < Decimal::ZERO {
                return Err(invalid(format!(
                    "fee '{}' rate must not be negative (got {})",
                    fee.name, fee.value
                )));
            }
        }

        if self.monthly_overrides.contains_key(&0) {
            return Err(invalid("month 0 cannot carry a return override".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ProjectionError {
    ProjectionError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProjectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_base() {
        let global = GlobalParameters {
            starting_principal: Decimal::ZERO,
            monthly_contribution: Decimal::ZERO,
            ..Default::default()
        };
        let err = ProjectionConfig::new(global).validate().unwrap_err();
        assert!(err.to_string().contains("both zero"));
    }

    #[test]
    fn test_zero_principal_with_contribution_is_valid() {
        let global = GlobalParameters {
            starting_principal: Decimal::ZERO,
            monthly_contribution: dec!(100),
            ..Default::default()
        };
        assert!(ProjectionConfig::new(global).validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_fee_and_zero_divisor() {
        let negative = ProjectionConfig::default().with_fee(Fee::annual("rebate", dec!(-0.01)));
        assert!(negative.validate().is_err());

        let mut fee = Fee::annual("broken", dec!(0.01));
        fee.applied_time_unit = 0;
        assert!(ProjectionConfig::default().with_fee(fee).validate().is_err());
    }

    #[test]
    fn test_rejects_month_zero_override() {
        let config = ProjectionConfig::default().with_override(0, ReturnOverride::ForceZero);
        assert!(config.validate().is_err());
    }
}
