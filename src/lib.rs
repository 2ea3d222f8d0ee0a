//! Tipsedge - expected-value system optimizer for pari-mutuel football pools.
//!
//! A coupon covers every event of a round with one, two or three outcomes.
//! Rows that the public under-plays pay more when they win, so the value of a
//! system depends on both the true outcome probabilities and how the public
//! has spread its stakes. This crate estimates that value and searches for
//! the best system under a fixed number of half and full hedges.
//!
//! # Modules
//!
//! - [`domain`] - Outcomes, events, systems, rounds and pool economics
//! - [`application`] - Row estimator, system evaluator, neighbourhood moves,
//!   simulated annealing, and the async search service
//! - [`port`] - Round source trait
//! - [`adapter`] - Draw-list JSON reader and the command-line interface
//! - [`infrastructure`] - Configuration loading and logging
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tipsedge::adapter::outbound::draw::DrawFile;
//! use tipsedge::application::solver::Annealer;
//! use tipsedge::domain::HedgeBudget;
//! use tipsedge::port::RoundSource;
//!
//! let round = DrawFile::new("draws.json").load()?;
//! let result = Annealer::default().optimize(
//!     &round.events,
//!     round.pool_size(),
//!     HedgeBudget::new(4, 2),
//!     &mut StdRng::seed_from_u64(7),
//! )?;
//! println!("{} ({:.2})", result.system(), result.expected_value);
//! # Ok::<(), tipsedge::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
