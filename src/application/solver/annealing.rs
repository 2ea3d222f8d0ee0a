//! Simulated annealing over hedge-constrained systems.
//!
//! Starts from the greedy system (favourites, with the first events forced
//! to full and half cover), then runs a fixed number of Metropolis steps
//! under geometric cooling. The incumbent best is returned, never the final
//! current state.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::estimator::EstimatorConfig;
use super::evaluator::Evaluator;
use super::neighbor::propose_neighbor;
use crate::domain::{DomainError, Event, HedgeBudget, SearchState, System};

/// Configuration for the annealing search.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnealingConfig {
    /// Iterations to run; the only stopping criterion.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,

    /// Multiplier applied to the temperature before every step.
    #[serde(default = "default_cooling_rate")]
    pub cooling_rate: f64,

    /// Seed for reproducible runs. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Independent chains to run; the best result wins.
    #[serde(default = "default_chains")]
    pub chains: usize,
}

fn default_max_iterations() -> usize {
    1000
}

fn default_initial_temperature() -> f64 {
    1.0
}

fn default_cooling_rate() -> f64 {
    0.995
}

fn default_chains() -> usize {
    1
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            initial_temperature: default_initial_temperature(),
            cooling_rate: default_cooling_rate(),
            seed: None,
            chains: default_chains(),
        }
    }
}

impl AnnealingConfig {
    /// Check the schedule parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfiguration`] for a non-positive
    /// temperature, a cooling rate outside `(0, 1]`, or zero chains.
    pub fn check(&self) -> Result<(), DomainError> {
        if !(self.initial_temperature > 0.0 && self.initial_temperature.is_finite()) {
            return Err(DomainError::invalid_configuration(format!(
                "initial temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(DomainError::invalid_configuration(format!(
                "cooling rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        if self.chains == 0 {
            return Err(DomainError::invalid_configuration("chains must be at least 1"));
        }
        Ok(())
    }
}

/// Snapshot handed to an [`AnnealingObserver`] after every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Zero-based iteration index.
    pub iteration: usize,
    pub temperature: f64,
    pub current_value: f64,
    pub best_value: f64,
    pub accepted: bool,
    /// Whether this step produced a new incumbent.
    pub improved: bool,
}

/// Hook for progress reporting.
pub trait AnnealingObserver {
    /// Called once per completed iteration.
    fn on_iteration(&mut self, _step: &Step) {}
}

/// Observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnnealingObserver for NoopObserver {}

impl<F: FnMut(&Step)> AnnealingObserver for F {
    fn on_iteration(&mut self, step: &Step) {
        self(step);
    }
}

/// Outcome of one annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimized {
    /// Best state seen.
    pub state: SearchState,
    /// Expected value of `state`.
    pub expected_value: f64,
    /// Iterations actually run.
    pub iterations: usize,
    pub accepted: usize,
    /// Number of times the incumbent was replaced.
    pub improvements: usize,
    /// True when stopped early by the cancellation flag.
    pub cancelled: bool,
}

impl Optimized {
    #[must_use]
    pub fn system(&self) -> &System {
        self.state.system()
    }
}

/// Simulated-annealing optimizer.
#[derive(Debug, Clone, Default)]
pub struct Annealer {
    config: AnnealingConfig,
    evaluator: Evaluator,
}

impl Annealer {
    #[must_use]
    pub fn new(config: AnnealingConfig, estimator: EstimatorConfig) -> Self {
        Self {
            config,
            evaluator: Evaluator::new(estimator),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Search for the highest-value system under `budget`.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidConfiguration`] if the budget does not fit
    ///   the round, the pool is empty, or the schedule is invalid.
    /// - Any evaluation error; the run fails rather than skipping a state.
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        events: &[Event],
        pool_size: u64,
        budget: HedgeBudget,
        rng: &mut R,
    ) -> Result<Optimized, DomainError> {
        let never = AtomicBool::new(false);
        self.optimize_with(events, pool_size, budget, rng, &never, &mut NoopObserver)
    }

    /// [`optimize`](Self::optimize) with a cancellation flag checked
    /// between iterations and an observer called after each one.
    ///
    /// # Errors
    ///
    /// See [`optimize`](Self::optimize).
    pub fn optimize_with<R, O>(
        &self,
        events: &[Event],
        pool_size: u64,
        budget: HedgeBudget,
        rng: &mut R,
        cancel: &AtomicBool,
        observer: &mut O,
    ) -> Result<Optimized, DomainError>
    where
        R: Rng + ?Sized,
        O: AnnealingObserver + ?Sized,
    {
        self.config.check()?;
        if pool_size == 0 {
            return Err(DomainError::invalid_configuration(
                "round has no turnover to estimate against",
            ));
        }

        let mut current = SearchState::greedy(events, budget)?;
        let mut current_value = self.evaluator.evaluate(current.system(), events, pool_size)?;
        let mut best = current.clone();
        let mut best_value = current_value;

        info!(
            events = events.len(),
            half = budget.half,
            full = budget.full,
            pool_size,
            iterations = self.config.max_iterations,
            initial_value = current_value,
            "annealing started"
        );

        let mut temperature = self.config.initial_temperature;
        let mut iterations = 0;
        let mut accepted_count = 0;
        let mut improvements = 0;
        let mut cancelled = false;

        for iteration in 0..self.config.max_iterations {
            if cancel.load(Ordering::Relaxed) {
                cancelled = true;
                warn!(iteration, "annealing cancelled");
                break;
            }

            temperature *= self.config.cooling_rate;
            let candidate = propose_neighbor(&current, budget, rng);
            let value = if candidate == current {
                current_value
            } else {
                self.evaluator.evaluate(candidate.system(), events, pool_size)?
            };

            let delta = value - current_value;
            let accepted = delta > 0.0 || (delta / temperature).exp() > rng.gen::<f64>();
            let mut improved = false;
            if accepted {
                accepted_count += 1;
                current = candidate;
                current_value = value;
                if current_value > best_value {
                    best = current.clone();
                    best_value = current_value;
                    improvements += 1;
                    improved = true;
                    debug!(
                        iteration,
                        value = best_value,
                        system = %best.system(),
                        "new best system"
                    );
                }
            }

            iterations += 1;
            observer.on_iteration(&Step {
                iteration,
                temperature,
                current_value,
                best_value,
                accepted,
                improved,
            });
        }

        info!(
            best_value,
            iterations,
            accepted = accepted_count,
            improvements,
            cancelled,
            "annealing finished"
        );

        Ok(Optimized {
            state: best,
            expected_value: best_value,
            iterations,
            accepted: accepted_count,
            improvements,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HedgeType, Probabilities};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn events() -> Vec<Event> {
        [
            ((0.5, 0.3, 0.2), (0.4, 0.35, 0.25)),
            ((0.25, 0.3, 0.45), (0.2, 0.3, 0.5)),
            ((0.7, 0.2, 0.1), (0.8, 0.15, 0.05)),
            ((0.35, 0.35, 0.3), (0.45, 0.3, 0.25)),
            ((0.15, 0.25, 0.6), (0.1, 0.2, 0.7)),
        ]
        .iter()
        .enumerate()
        .map(|(i, (a, f))| {
            Event::try_new(
                i as u32 + 1,
                format!("Home {i} - Away {i}"),
                Probabilities::new(a.0, a.1, a.2),
                Probabilities::new(f.0, f.1, f.2),
            )
            .unwrap()
        })
        .collect()
    }

    fn annealer(iterations: usize) -> Annealer {
        Annealer::new(
            AnnealingConfig {
                max_iterations: iterations,
                ..AnnealingConfig::default()
            },
            EstimatorConfig::default(),
        )
    }

    #[test]
    fn best_value_never_decreases() {
        let events = events();
        let mut rng = StdRng::seed_from_u64(42);
        let mut bests = Vec::new();
        let mut record = |step: &Step| bests.push(step.best_value);

        let result = annealer(300)
            .optimize_with(
                &events,
                20_000,
                HedgeBudget::new(1, 1),
                &mut rng,
                &AtomicBool::new(false),
                &mut record,
            )
            .unwrap();

        assert_eq!(bests.len(), 300);
        assert!(bests.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(*bests.last().unwrap(), result.expected_value);
    }

    #[test]
    fn result_respects_budget_and_matches_its_value() {
        let events = events();
        let annealer = annealer(200);
        let budget = HedgeBudget::new(2, 1);
        let result = annealer
            .optimize(&events, 5_000, budget, &mut StdRng::seed_from_u64(9))
            .unwrap();

        assert!(result.state.satisfies(budget));
        assert_eq!(result.system().count(HedgeType::Half), 2);
        assert_eq!(result.system().count(HedgeType::Full), 1);
        let value = annealer
            .evaluator()
            .evaluate(result.system(), &events, 5_000)
            .unwrap();
        assert_eq!(value, result.expected_value);
    }

    #[test]
    fn same_seed_same_result() {
        let events = events();
        let annealer = annealer(150);
        let budget = HedgeBudget::new(1, 0);
        let a = annealer
            .optimize(&events, 1_000, budget, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let b = annealer
            .optimize(&events, 1_000, budget, &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn overcommitted_budget_fails_before_search() {
        let events = events();
        let result = annealer(10).optimize(
            &events,
            1_000,
            HedgeBudget::new(3, 3),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(DomainError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let result = annealer(10).optimize(
            &events(),
            0,
            HedgeBudget::new(1, 0),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(DomainError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        let annealer = Annealer::new(
            AnnealingConfig {
                cooling_rate: 1.5,
                ..AnnealingConfig::default()
            },
            EstimatorConfig::default(),
        );
        let result = annealer.optimize(
            &events(),
            1_000,
            HedgeBudget::default(),
            &mut StdRng::seed_from_u64(1),
        );
        assert!(matches!(
            result,
            Err(DomainError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn preset_cancellation_returns_greedy_state() {
        let events = events();
        let budget = HedgeBudget::new(1, 1);
        let result = annealer(1_000)
            .optimize_with(
                &events,
                1_000,
                budget,
                &mut StdRng::seed_from_u64(1),
                &AtomicBool::new(true),
                &mut NoopObserver,
            )
            .unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.state, SearchState::greedy(&events, budget).unwrap());
    }
}
