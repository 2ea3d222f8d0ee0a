//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated,
//! either while building events from provider data or while the solver works
//! through candidate systems.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use tipsedge::domain::error::DomainError;
//! use tipsedge::domain::{Event, Probabilities};
//!
//! // Probabilities above one will fail validation
//! let result = Event::try_new(
//!     1,
//!     "Arsenal - Chelsea",
//!     Probabilities::new(1.5, 0.3, 0.2),
//!     Probabilities::new(0.4, 0.35, 0.25),
//! );
//!
//! assert!(matches!(result, Err(DomainError::MalformedEvent { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
///
/// All variants are recoverable by the caller. The solver never substitutes
/// default values for a failed computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The hedge budget cannot be satisfied by the round.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// The public-share variance of a row is zero, so the standardized
    /// distance used by the estimator is undefined.
    #[error("degenerate probability model for row {row}: share variance is zero")]
    DegenerateProbabilityModel {
        /// The offending row, rendered as outcome symbols.
        row: String,
    },

    /// An event carries probabilities outside the unit interval.
    #[error("malformed event {event}: {reason}")]
    MalformedEvent {
        /// Event number as supplied by the provider.
        event: u32,
        /// What is wrong with it.
        reason: String,
    },

    /// A row or system string contains something other than `1`, `X` or `2`.
    #[error("malformed row: {reason}")]
    MalformedRow {
        /// What is wrong with it.
        reason: String,
    },

    /// The row does not cover exactly one outcome per event.
    #[error("row covers {row} events but the round has {events}")]
    RowLengthMismatch {
        /// Length of the row.
        row: usize,
        /// Number of events.
        events: usize,
    },
}

impl DomainError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
