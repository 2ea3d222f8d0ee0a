//! Runs annealing searches on tokio's blocking pool.
//!
//! Each run owns its RNG and state; runs share only the immutable round and
//! the cancellation flag. Running several chains for one budget and keeping
//! the best changes the result distribution compared to a single chain of
//! the same length, so `chains = 1` is the default.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Semaphore;
use tracing::info;

use super::solver::{Annealer, Optimized, Step};
use crate::domain::{DomainError, Event, HedgeBudget};
use crate::error::Result;

/// Progress callback, told which run a step belongs to.
pub type ProgressFn = dyn Fn(usize, &Step) + Send + Sync;

/// Shared context for a batch of independent searches.
#[derive(Clone)]
pub struct SearchService {
    annealer: Arc<Annealer>,
    events: Arc<[Event]>,
    pool_size: u64,
    cancel: Arc<AtomicBool>,
    limit: Arc<Semaphore>,
    progress: Option<Arc<ProgressFn>>,
}

impl SearchService {
    /// Create a service; at most `concurrency` runs execute at once.
    pub fn new(annealer: Annealer, events: Vec<Event>, pool_size: u64, concurrency: usize) -> Self {
        Self {
            annealer: Arc::new(annealer),
            events: events.into(),
            pool_size,
            cancel: Arc::new(AtomicBool::new(false)),
            limit: Arc::new(Semaphore::new(concurrency.max(1))),
            progress: None,
        }
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Flag that stops every run at its next iteration boundary.
    #[must_use]
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Run `chains` independent chains for one budget, seeded `seed`,
    /// `seed + 1`, ..., and return the best.
    pub async fn run_chains(&self, budget: HedgeBudget, seed: u64, chains: usize) -> Result<Optimized> {
        let runs = (0..chains.max(1))
            .map(|k| (budget, seed.wrapping_add(k as u64)))
            .collect();
        let results = self.run_all(runs).await?;

        results
            .into_iter()
            .map(|(_, result)| result)
            .reduce(|best, next| {
                if next.expected_value > best.expected_value {
                    next
                } else {
                    best
                }
            })
            .ok_or_else(|| DomainError::invalid_configuration("no chains ran").into())
    }

    /// Run one search per budget, all with the same seed, sorted by
    /// descending expected value.
    pub async fn sweep(&self, budgets: &[HedgeBudget], seed: u64) -> Result<Vec<(HedgeBudget, Optimized)>> {
        let runs = budgets.iter().map(|b| (*b, seed)).collect();
        let mut results = self.run_all(runs).await?;
        results.sort_by(|a, b| b.1.expected_value.total_cmp(&a.1.expected_value));
        Ok(results)
    }

    async fn run_all(&self, runs: Vec<(HedgeBudget, u64)>) -> Result<Vec<(HedgeBudget, Optimized)>> {
        let mut handles = Vec::with_capacity(runs.len());

        for (index, (budget, seed)) in runs.into_iter().enumerate() {
            let service = self.clone();
            handles.push(tokio::spawn(async move {
                let _permit = Arc::clone(&service.limit).acquire_owned().await;
                tokio::task::spawn_blocking(move || service.run_one(index, budget, seed)).await
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(join)) | Err(join) => Err(join.into()),
            };
            match outcome {
                Ok(result) => results.push(result),
                Err(err) => {
                    // Stop the runs still in flight; their results are dropped.
                    self.cancel.store(true, Ordering::Relaxed);
                    return Err(err);
                }
            }
        }
        Ok(results)
    }

    fn run_one(&self, index: usize, budget: HedgeBudget, seed: u64) -> Result<(HedgeBudget, Optimized)> {
        info!(run = index, %budget, seed, "search run starting");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut report = |step: &Step| {
            if let Some(progress) = &self.progress {
                progress(index, step);
            }
        };
        let result = self.annealer.optimize_with(
            &self.events,
            self.pool_size,
            budget,
            &mut rng,
            &self.cancel,
            &mut report,
        )?;
        Ok((budget, result))
    }
}
