//! Pool events and their probability tuples.

use serde::Serialize;

use super::error::DomainError;
use super::outcome::Outcome;

/// Tolerance on how far a probability tuple may sum away from one.
///
/// Provider percentages are rounded, so tuples like 41/33/27 are normal.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 0.05;

/// Probability tuple over (`1`, `X`, `2`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl Probabilities {
    #[must_use]
    pub const fn new(home: f64, draw: f64, away: f64) -> Self {
        Self { home, draw, away }
    }

    /// Probability for a single outcome.
    #[must_use]
    pub const fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }

    /// Outcome with the highest probability. Ties go to the earlier outcome.
    #[must_use]
    pub fn favourite(&self) -> Outcome {
        let mut best = Outcome::Home;
        for outcome in [Outcome::Draw, Outcome::Away] {
            if self.get(outcome) > self.get(best) {
                best = outcome;
            }
        }
        best
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.home + self.draw + self.away
    }

    fn check(&self) -> Result<(), String> {
        for outcome in Outcome::ALL {
            let p = self.get(outcome);
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("probability for {outcome} is {p}, outside [0, 1]"));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(format!("probabilities sum to {sum:.4}"));
        }
        Ok(())
    }
}

/// One match on the coupon.
///
/// Immutable once built; `try_new` is the only way in, so every event the
/// solver sees has validated tuples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    number: u32,
    description: String,
    odds: Probabilities,
    public: Probabilities,
}

impl Event {
    /// Build an event, validating both probability tuples.
    ///
    /// `odds` are the odds-implied probabilities used as the true outcome
    /// probabilities; `public` are the shares of money the public has
    /// placed on each outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MalformedEvent`] if either tuple has a value
    /// outside `[0, 1]` (NaN included) or does not sum to roughly one.
    pub fn try_new(
        number: u32,
        description: impl Into<String>,
        odds: Probabilities,
        public: Probabilities,
    ) -> Result<Self, DomainError> {
        odds.check().map_err(|reason| DomainError::MalformedEvent {
            event: number,
            reason: format!("odds: {reason}"),
        })?;
        public.check().map_err(|reason| DomainError::MalformedEvent {
            event: number,
            reason: format!("public shares: {reason}"),
        })?;

        Ok(Self {
            number,
            description: description.into(),
            odds,
            public,
        })
    }

    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Odds-implied probabilities.
    #[must_use]
    pub const fn odds(&self) -> &Probabilities {
        &self.odds
    }

    /// Public-money shares.
    #[must_use]
    pub const fn public(&self) -> &Probabilities {
        &self.public
    }
}
