//! Pool-agnostic domain types: events, outcome sets, systems and rounds.

pub mod error;
mod event;
mod outcome;
mod round;
mod system;

pub use error::DomainError;
pub use event::{Event, Probabilities, PROBABILITY_SUM_TOLERANCE};
pub use outcome::{format_row, parse_row, HedgeType, Outcome, OutcomeSet};
pub use round::{stake_cost, Product, Round};
pub use system::{combinations, HedgeBudget, Rows, SearchState, System};
