//! JSON-based configuration loader

use std::fs;
use std::path::Path;

use super::data::ProjectionConfig;
use crate::error::ProjectionResultOf;

/// Parse and validate a configuration from a JSON document
pub fn parse_config(json: &str) -> ProjectionResultOf<ProjectionConfig> {
    let config: ProjectionConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a configuration from a JSON file
pub fn load_config(path: &Path) -> ProjectionResultOf<ProjectionConfig> {
    let contents = fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    log::debug!(
        "Loaded configuration from {} ({} fees, {} overrides)",
        path.display(),
        config.fees.len(),
        config.monthly_overrides.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReturnOverride;
    use crate::error::ProjectionError;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "global": {
            "starting_principal": "1000",
            "monthly_contribution": "50",
            "start_date": "2024-01-01",
            "end_date": "2025-01-01",
            "currency": "EUR"
        },
        "returns": { "value": "0.06", "quote_time_unit": "year", "applied_time_unit": 12 },
        "fees": [
            { "name": "TER", "fee_type": "management", "value": "0.012" }
        ],
        "monthly_overrides": {
            "3": { "explicit": { "rate_pct": "-2.5" } },
            "4": "force_zero"
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.global.starting_principal, dec!(1000));
        assert_eq!(config.global.num_months, 0);
        assert_eq!(config.global.currency, "EUR");
        assert_eq!(config.fees[0].applied_time_unit, 12);
        assert_eq!(
            config.monthly_overrides.get(&3),
            Some(&ReturnOverride::Explicit { rate_pct: dec!(-2.5) })
        );
        assert_eq!(config.monthly_overrides.get(&4), Some(&ReturnOverride::ForceZero));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let json = SAMPLE.replace("\"1000\"", "\"-1\"");
        assert!(matches!(parse_config(&json), Err(ProjectionError::InvalidConfig(_))));
        assert!(matches!(parse_config("{"), Err(ProjectionError::Json(_))));
    }

    #[test]
    fn test_demo_config_parses() {
        let config = parse_config(include_str!("../../demos/sample_config.json")).unwrap();
        assert_eq!(config.fees.len(), 2);
        assert_eq!(config.global.monthly_contribution, dec!(250));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(ProjectionError::Io(_))));
    }
}
