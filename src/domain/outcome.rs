//! Match outcomes and the per-event outcome sets a system stakes on.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// One of the three results of a football match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// Home win, written `1`.
    Home,
    /// Draw, written `X`.
    Draw,
    /// Away win, written `2`.
    Away,
}

impl Outcome {
    /// All outcomes in coupon order.
    pub const ALL: [Outcome; 3] = [Outcome::Home, Outcome::Draw, Outcome::Away];

    /// Coupon symbol for this outcome.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Home => '1',
            Self::Draw => 'X',
            Self::Away => '2',
        }
    }

    /// Parse a coupon symbol.
    pub fn from_symbol(symbol: char) -> Result<Self, DomainError> {
        match symbol {
            '1' => Ok(Self::Home),
            'X' | 'x' => Ok(Self::Draw),
            '2' => Ok(Self::Away),
            other => Err(DomainError::MalformedRow {
                reason: format!("unknown outcome symbol '{other}'"),
            }),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Home => 0b001,
            Self::Draw => 0b010,
            Self::Away => 0b100,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Coverage breadth of one event in a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HedgeType {
    /// One outcome covered.
    Single,
    /// Two outcomes covered.
    Half,
    /// All three outcomes covered.
    Full,
}

impl HedgeType {
    /// Every outcome set of this hedge type, in coupon order.
    #[must_use]
    pub const fn options(self) -> &'static [OutcomeSet] {
        match self {
            Self::Single => &OutcomeSet::SINGLES,
            Self::Half => &OutcomeSet::HALVES,
            Self::Full => &OutcomeSet::FULLS,
        }
    }

    /// Hedge type for an outcome set of the given size.
    #[must_use]
    pub const fn from_cardinality(len: usize) -> Option<Self> {
        match len {
            1 => Some(Self::Single),
            2 => Some(Self::Half),
            3 => Some(Self::Full),
            _ => None,
        }
    }
}

impl fmt::Display for HedgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Half => write!(f, "half"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// Non-empty set of outcomes staked on a single event.
///
/// Stored as a bit mask so systems clone cheaply; iteration always yields
/// outcomes in coupon order (`1`, `X`, `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutcomeSet(u8);

impl OutcomeSet {
    const FULL_MASK: u8 = 0b111;

    /// The three single-outcome sets.
    pub const SINGLES: [OutcomeSet; 3] = [
        OutcomeSet(0b001), // 1
        OutcomeSet(0b010), // X
        OutcomeSet(0b100), // 2
    ];

    /// The three two-outcome sets.
    pub const HALVES: [OutcomeSet; 3] = [
        OutcomeSet(0b011), // 1X
        OutcomeSet(0b101), // 12
        OutcomeSet(0b110), // X2
    ];

    /// The full cover `1X2`.
    pub const FULL: OutcomeSet = OutcomeSet(Self::FULL_MASK);

    const FULLS: [OutcomeSet; 1] = [Self::FULL];

    /// Set holding exactly one outcome.
    #[must_use]
    pub const fn single(outcome: Outcome) -> Self {
        Self(outcome.bit())
    }

    /// Build a set from a list of outcomes. Returns `None` when empty.
    #[must_use]
    pub fn from_outcomes(outcomes: &[Outcome]) -> Option<Self> {
        let mask = outcomes.iter().fold(0u8, |acc, o| acc | o.bit());
        (mask != 0).then_some(Self(mask))
    }

    /// Number of outcomes covered.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True only for the zero mask, which no constructor produces.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the set covers `outcome`.
    #[must_use]
    pub const fn contains(self, outcome: Outcome) -> bool {
        self.0 & outcome.bit() != 0
    }

    /// Hedge type implied by the cardinality.
    #[must_use]
    pub fn hedge_type(self) -> HedgeType {
        match self.len() {
            1 => HedgeType::Single,
            2 => HedgeType::Half,
            _ => HedgeType::Full,
        }
    }

    /// Covered outcomes in coupon order.
    pub fn iter(self) -> impl Iterator<Item = Outcome> {
        Outcome::ALL.into_iter().filter(move |o| self.contains(*o))
    }
}

impl fmt::Display for OutcomeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in self.iter() {
            write!(f, "{}", outcome.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for OutcomeSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = 0u8;
        for symbol in s.trim().chars() {
            let bit = Outcome::from_symbol(symbol)?.bit();
            if mask & bit != 0 {
                return Err(DomainError::MalformedRow {
                    reason: format!("outcome '{symbol}' repeated in '{s}'"),
                });
            }
            mask |= bit;
        }
        if mask == 0 {
            return Err(DomainError::MalformedRow {
                reason: "empty outcome set".into(),
            });
        }
        Ok(Self(mask))
    }
}

/// Parse a row such as `"1X21"` into outcomes.
pub fn parse_row(s: &str) -> Result<Vec<Outcome>, DomainError> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(Outcome::from_symbol)
        .collect()
}

/// Render a row as coupon symbols.
#[must_use]
pub fn format_row(row: &[Outcome]) -> String {
    row.iter().map(|o| o.symbol()).collect()
}
