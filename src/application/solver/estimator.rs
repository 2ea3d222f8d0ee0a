//! Expected-value estimate for a single coupon row.
//!
//! The number of other bettors matching every pick of a row is modelled as
//! a sum of independent Bernoulli trials, one per event, each succeeding
//! with the public share of the picked outcome. That sum is approximated by
//! a normal distribution, which gives the dilution term below. The row's
//! true win probability over its popularity scales the result.
//!
//! ```text
//! mu      = sum f_i
//! sigma^2 = sum f_i (1 - f_i)
//! m*      = (g - mu) / sigma
//! adj     = Phi(m* + 1/2)^(N+1) - Phi(m* - 1/2)^(N+1) - Phi(m* + 1/2) + Phi(m* - 1/2)
//! E       = (prod a_i / prod f_i) * integral_{-L}^{L} adj * phi(t) dt
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::normal::{norm_cdf, norm_pdf, simpson};
use crate::domain::{format_row, DomainError, Event, Outcome};

/// How the density integral around the correction term is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrature {
    /// Composite Simpson over `[-L, L]`, matching the reference model.
    #[default]
    Simpson,
    /// Treat the density as integrating to exactly one.
    Closed,
}

/// What the evaluator does with a row whose share variance is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Fail the whole evaluation.
    #[default]
    Abort,
    /// Count the row as worth nothing.
    Zero,
}

impl fmt::Display for Quadrature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simpson => "simpson",
            Self::Closed => "closed",
        })
    }
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Abort => "abort",
            Self::Zero => "zero",
        })
    }
}

/// Configuration for the row estimator.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Simpson subintervals, at least [`Self::MIN_SUBINTERVALS`]; odd
    /// values are rounded up.
    #[serde(default = "default_subintervals")]
    pub subintervals: usize,

    /// Half-width `L` of the integration window, at least
    /// [`Self::MIN_INTEGRATION_LIMIT`].
    #[serde(default = "default_integration_limit")]
    pub integration_limit: f64,

    #[serde(default)]
    pub quadrature: Quadrature,

    #[serde(default)]
    pub degenerate: DegeneratePolicy,
}

fn default_subintervals() -> usize {
    1000
}

fn default_integration_limit() -> f64 {
    6.0
}

impl EstimatorConfig {
    pub const MIN_SUBINTERVALS: usize = 1000;
    pub const MIN_INTEGRATION_LIMIT: f64 = 6.0;
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            subintervals: default_subintervals(),
            integration_limit: default_integration_limit(),
            quadrature: Quadrature::default(),
            degenerate: DegeneratePolicy::default(),
        }
    }
}

/// Row value estimator.
///
/// The correction term does not depend on the integration variable, so the
/// quadrature of the density is computed once at construction and reused
/// for every row.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
    density_mass: f64,
}

impl Estimator {
    /// Build an estimator; a coarser grid or narrower window than the
    /// minimum is raised to it.
    #[must_use]
    pub fn new(mut config: EstimatorConfig) -> Self {
        config.subintervals = config.subintervals.max(EstimatorConfig::MIN_SUBINTERVALS);
        config.integration_limit = config
            .integration_limit
            .max(EstimatorConfig::MIN_INTEGRATION_LIMIT);
        let density_mass = match config.quadrature {
            Quadrature::Simpson => {
                let limit = config.integration_limit;
                simpson(norm_pdf, -limit, limit, config.subintervals)
            }
            Quadrature::Closed => 1.0,
        };
        Self {
            config,
            density_mass,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Approximate expected payout of one row.
    ///
    /// `pool_size` is the turnover of the round; `N + 1` in the model is
    /// this bettor plus the pool.
    ///
    /// # Errors
    ///
    /// - [`DomainError::RowLengthMismatch`] if the row does not cover every
    ///   event exactly once.
    /// - [`DomainError::DegenerateProbabilityModel`] if every picked share
    ///   is exactly one, leaving zero variance.
    pub fn estimate_row(
        &self,
        row: &[Outcome],
        events: &[Event],
        pool_size: u64,
    ) -> Result<f64, DomainError> {
        if row.len() != events.len() {
            return Err(DomainError::RowLengthMismatch {
                row: row.len(),
                events: events.len(),
            });
        }

        let mut share_sum = 0.0;
        let mut share_var = 0.0;
        let mut odds_product = 1.0;
        let mut share_product = 1.0;
        for (&outcome, event) in row.iter().zip(events) {
            let f = event.public().get(outcome);
            share_sum += f;
            share_var += f * (1.0 - f);
            odds_product *= event.odds().get(outcome);
            share_product *= f;
        }

        // Nobody in the model backs this row.
        if share_product == 0.0 {
            return Ok(0.0);
        }
        if share_var <= 0.0 {
            return Err(DomainError::DegenerateProbabilityModel {
                row: format_row(row),
            });
        }

        let m_star = (row.len() as f64 - share_sum) / share_var.sqrt();
        let share_ratio = odds_product / share_product;
        let exponent = pool_size as f64 + 1.0;

        let upper = norm_cdf(0.5 + m_star);
        let lower = norm_cdf(-0.5 + m_star);
        let adjustment = upper.powf(exponent) - lower.powf(exponent) - upper + lower;

        Ok(share_ratio * adjustment * self.density_mass)
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

/// Estimate one row with the default estimator settings.
///
/// # Errors
///
/// See [`Estimator::estimate_row`].
pub fn estimate_row_value(
    row: &[Outcome],
    events: &[Event],
    pool_size: u64,
) -> Result<f64, DomainError> {
    Estimator::default().estimate_row(row, events, pool_size)
}
