//! Expected-value estimation and constrained system search.
//!
//! Layered bottom-up: [`estimator`] values one row, [`evaluator`] sums a
//! system's rows, [`neighbor`] proposes budget-preserving moves, and
//! [`annealing`] drives the search.

pub mod annealing;
pub mod estimator;
pub mod evaluator;
pub mod neighbor;
pub mod normal;

pub use annealing::{AnnealingConfig, AnnealingObserver, Annealer, NoopObserver, Optimized, Step};
pub use estimator::{estimate_row_value, DegeneratePolicy, Estimator, EstimatorConfig, Quadrature};
pub use evaluator::{Evaluation, Evaluator};
pub use neighbor::propose_neighbor;
