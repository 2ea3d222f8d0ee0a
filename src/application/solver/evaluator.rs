//! System evaluation: expand into rows and sum the row estimates.

use tracing::trace;

use super::estimator::{DegeneratePolicy, Estimator, EstimatorConfig};
use crate::domain::{DomainError, Event, System};

/// Breakdown of one system evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Summed expected value over all rows.
    pub value: f64,
    /// Rows expanded.
    pub rows: u64,
    /// Degenerate rows counted as zero under [`DegeneratePolicy::Zero`].
    pub zeroed: u64,
}

/// Sums row estimates across the cross product of a system.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    estimator: Estimator,
}

impl Evaluator {
    #[must_use]
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            estimator: Estimator::new(config),
        }
    }

    #[must_use]
    pub const fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Expected value of a whole system.
    ///
    /// # Errors
    ///
    /// Fails if the system and events differ in length, or if a row is
    /// degenerate and the policy is [`DegeneratePolicy::Abort`].
    pub fn evaluate(
        &self,
        system: &System,
        events: &[Event],
        pool_size: u64,
    ) -> Result<f64, DomainError> {
        self.evaluate_detailed(system, events, pool_size)
            .map(|e| e.value)
    }

    /// Like [`evaluate`](Self::evaluate), also reporting row counts.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn evaluate_detailed(
        &self,
        system: &System,
        events: &[Event],
        pool_size: u64,
    ) -> Result<Evaluation, DomainError> {
        if system.len() != events.len() {
            return Err(DomainError::RowLengthMismatch {
                row: system.len(),
                events: events.len(),
            });
        }

        let policy = self.estimator.config().degenerate;
        let mut sum = NeumaierSum::default();
        let mut rows = 0u64;
        let mut zeroed = 0u64;

        for row in system.rows() {
            rows += 1;
            match self.estimator.estimate_row(&row, events, pool_size) {
                Ok(value) => sum.add(value),
                Err(DomainError::DegenerateProbabilityModel { row })
                    if policy == DegeneratePolicy::Zero =>
                {
                    trace!(row = %row, "degenerate row counted as zero");
                    zeroed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Evaluation {
            value: sum.total(),
            rows,
            zeroed,
        })
    }
}

/// Compensated summation, stable over tens of thousands of rows.
#[derive(Debug, Default)]
struct NeumaierSum {
    sum: f64,
    compensation: f64,
}

impl NeumaierSum {
    fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}
