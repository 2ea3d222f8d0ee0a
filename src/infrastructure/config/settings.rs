//! Application settings loaded from TOML.
//!
//! Every section is optional; a missing file section takes its defaults.
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [annealing]
//! max_iterations = 1000
//! initial_temperature = 1.0
//! cooling_rate = 0.995
//! seed = 42
//! chains = 1
//!
//! [estimator]
//! subintervals = 1000
//! integration_limit = 6.0
//! quadrature = "simpson"
//! degenerate = "abort"
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::solver::{AnnealingConfig, EstimatorConfig};
use crate::error::{ConfigError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub annealing: AnnealingConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,
}

impl Config {
    /// Parse and validate configuration text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown enum values,
    /// [`ConfigError::InvalidValue`] for values out of range.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ReadFile`] when the file cannot be read, otherwise as
    /// [`parse_toml`](Self::parse_toml).
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Check every value the search depends on.
    ///
    /// Run again after CLI overrides are applied.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LoggingConfig::FORMATS.join(", ")),
            }
            .into());
        }

        let annealing = &self.annealing;
        if !(annealing.initial_temperature > 0.0 && annealing.initial_temperature.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "initial_temperature",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(annealing.cooling_rate > 0.0 && annealing.cooling_rate <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "cooling_rate",
                reason: "must be in (0, 1]".to_string(),
            }
            .into());
        }
        if annealing.chains == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chains",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let estimator = &self.estimator;
        if estimator.subintervals < EstimatorConfig::MIN_SUBINTERVALS {
            return Err(ConfigError::InvalidValue {
                field: "subintervals",
                reason: format!("must be at least {}", EstimatorConfig::MIN_SUBINTERVALS),
            }
            .into());
        }
        let limit = estimator.integration_limit;
        if !(limit >= EstimatorConfig::MIN_INTEGRATION_LIMIT && limit.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "integration_limit",
                reason: format!("must be at least {}", EstimatorConfig::MIN_INTEGRATION_LIMIT),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::solver::{DegeneratePolicy, Quadrature};
    use crate::error::Error;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.annealing.max_iterations, 1000);
        assert_eq!(config.annealing.initial_temperature, 1.0);
        assert_eq!(config.annealing.cooling_rate, 0.995);
        assert_eq!(config.annealing.seed, None);
        assert_eq!(config.annealing.chains, 1);
        assert_eq!(config.estimator.subintervals, 1000);
        assert_eq!(config.estimator.integration_limit, 6.0);
        assert_eq!(config.estimator.quadrature, Quadrature::Simpson);
        assert_eq!(config.estimator.degenerate, DegeneratePolicy::Abort);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse_toml(
            r#"
            [annealing]
            seed = 7

            [estimator]
            degenerate = "zero"
            "#,
        )
        .unwrap();
        assert_eq!(config.annealing.seed, Some(7));
        assert_eq!(config.annealing.max_iterations, 1000);
        assert_eq!(config.estimator.degenerate, DegeneratePolicy::Zero);
        assert_eq!(config.estimator.quadrature, Quadrature::Simpson);
    }

    #[test]
    fn cooling_rate_above_one_is_rejected() {
        let result = Config::parse_toml("[annealing]\ncooling_rate = 1.01\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "cooling_rate",
                ..
            }))
        ));
    }

    #[test]
    fn zero_temperature_is_rejected() {
        let result = Config::parse_toml("[annealing]\ninitial_temperature = 0.0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "initial_temperature",
                ..
            }))
        ));
    }

    #[test]
    fn subinterval_count_below_minimum_is_rejected() {
        let result = Config::parse_toml("[estimator]\nsubintervals = 999\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "subintervals",
                ..
            }))
        ));
    }

    #[test]
    fn narrow_integration_window_is_rejected() {
        let result = Config::parse_toml("[estimator]\nintegration_limit = 0.5\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "integration_limit",
                ..
            }))
        ));
    }

    #[test]
    fn unknown_quadrature_is_a_parse_error() {
        let result = Config::parse_toml("[estimator]\nquadrature = \"trapezoid\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
        ));
    }
}
