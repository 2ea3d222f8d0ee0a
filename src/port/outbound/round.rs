//! Round data port.

use crate::domain::Round;
use crate::error::Result;

/// Source of round data (event list, probabilities, turnover).
///
/// Implementations hand over fully parsed and validated rounds; the solver
/// performs no I/O of its own.
pub trait RoundSource: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load the currently open round.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or any event fails
    /// validation.
    fn load(&self) -> Result<Round>;
}
