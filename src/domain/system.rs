//! Betting systems, their row expansion, and the annealer's search state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DomainError;
use super::event::Event;
use super::outcome::{HedgeType, Outcome, OutcomeSet};

/// Required number of half and full hedges for one optimization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct HedgeBudget {
    pub half: usize,
    pub full: usize,
}

impl HedgeBudget {
    #[must_use]
    pub const fn new(half: usize, full: usize) -> Self {
        Self { half, full }
    }

    /// Number of single-outcome events left over in a round of `n` events.
    #[must_use]
    pub const fn singles(&self, n: usize) -> usize {
        n.saturating_sub(self.half + self.full)
    }

    /// Target count for a hedge type in a round of `n` events.
    #[must_use]
    pub const fn target(&self, hedge: HedgeType, n: usize) -> usize {
        match hedge {
            HedgeType::Single => self.singles(n),
            HedgeType::Half => self.half,
            HedgeType::Full => self.full,
        }
    }

    /// Check the budget fits a round of `n` events.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfiguration`] when the round is empty
    /// or `half + full > n`.
    pub fn check(&self, n: usize) -> Result<(), DomainError> {
        if n == 0 {
            return Err(DomainError::invalid_configuration("round has no events"));
        }
        if self.half + self.full > n {
            return Err(DomainError::invalid_configuration(format!(
                "{} half and {} full hedges exceed {n} events",
                self.half, self.full
            )));
        }
        Ok(())
    }
}

impl fmt::Display for HedgeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}H/{}F", self.half, self.full)
    }
}

/// One outcome set per event, in event order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct System(Vec<OutcomeSet>);

impl System {
    #[must_use]
    pub fn new(sets: Vec<OutcomeSet>) -> Self {
        Self(sets)
    }

    #[must_use]
    pub fn sets(&self) -> &[OutcomeSet] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rows the system expands to, saturating at `u64::MAX`.
    #[must_use]
    pub fn row_count(&self) -> u64 {
        self.0
            .iter()
            .fold(1u64, |acc, set| acc.saturating_mul(set.len() as u64))
    }

    /// Count of events with the given hedge type.
    #[must_use]
    pub fn count(&self, hedge: HedgeType) -> usize {
        self.0.iter().filter(|s| s.hedge_type() == hedge).count()
    }

    /// Expand into every row of the cross product.
    #[must_use]
    pub fn rows(&self) -> Rows<'_> {
        combinations(&self.0)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{set}")?;
        }
        Ok(())
    }
}

impl FromStr for System {
    type Err = DomainError;

    /// Parse whitespace- or comma-separated outcome sets, e.g. `"1 X2 1X2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl Serialize for System {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(ToString::to_string))
    }
}

/// Cross product of outcome sets as an iterator of rows.
///
/// Rows come out in lexicographic order with the last event varying
/// fastest, so `[[1,X],[1,2]]` yields `11, 12, X1, X2`. An empty slice
/// yields exactly one empty row.
#[must_use]
pub fn combinations(sets: &[OutcomeSet]) -> Rows<'_> {
    Rows {
        sets,
        options: sets.iter().map(|s| s.iter().collect()).collect(),
        cursor: vec![0; sets.len()],
        done: false,
    }
}

/// Iterator returned by [`combinations`].
pub struct Rows<'a> {
    sets: &'a [OutcomeSet],
    options: Vec<Vec<Outcome>>,
    cursor: Vec<usize>,
    done: bool,
}

impl Rows<'_> {
    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        // Mixed-radix distance from the cursor to the end.
        let mut remaining = 0usize;
        for (pos, options) in self.cursor.iter().zip(&self.options) {
            remaining = remaining
                .saturating_mul(options.len())
                .saturating_add(options.len() - 1 - pos);
        }
        remaining.saturating_add(1)
    }
}

impl Iterator for Rows<'_> {
    type Item = Vec<Outcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let row = self
            .cursor
            .iter()
            .zip(&self.options)
            .map(|(&i, options)| options[i])
            .collect();

        self.done = true;
        for pos in (0..self.sets.len()).rev() {
            self.cursor[pos] += 1;
            if self.cursor[pos] < self.options[pos].len() {
                self.done = false;
                break;
            }
            self.cursor[pos] = 0;
        }

        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

/// A system plus explicit hedge-type tags, the unit the annealer mutates.
///
/// Always handled by value: neighbours and incumbents are clones, never
/// views into another state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchState {
    system: System,
    hedges: Vec<HedgeType>,
}

impl SearchState {
    /// Wrap a system, tagging each event by its set cardinality.
    #[must_use]
    pub fn from_system(system: System) -> Self {
        let hedges = system.sets().iter().map(|s| s.hedge_type()).collect();
        Self { system, hedges }
    }

    /// Greedy starting point for a search.
    ///
    /// Every event starts on its odds favourite. The first `budget.full`
    /// events are then forced to full cover and the next `budget.half` to
    /// the first half option (`1X`), overwriting the favourite.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfiguration`] if the budget does not
    /// fit the round.
    pub fn greedy(events: &[Event], budget: HedgeBudget) -> Result<Self, DomainError> {
        budget.check(events.len())?;

        let mut sets = Vec::with_capacity(events.len());
        let mut hedges = Vec::with_capacity(events.len());
        for (i, event) in events.iter().enumerate() {
            let hedge = if i < budget.full {
                HedgeType::Full
            } else if i < budget.full + budget.half {
                HedgeType::Half
            } else {
                HedgeType::Single
            };
            let set = match hedge {
                HedgeType::Single => OutcomeSet::single(event.odds().favourite()),
                other => other.options()[0],
            };
            sets.push(set);
            hedges.push(hedge);
        }

        Ok(Self {
            system: System::new(sets),
            hedges,
        })
    }

    #[must_use]
    pub fn system(&self) -> &System {
        &self.system
    }

    #[must_use]
    pub fn hedges(&self) -> &[HedgeType] {
        &self.hedges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hedges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hedges.is_empty()
    }

    /// Count of hedge tags of the given type.
    #[must_use]
    pub fn count(&self, hedge: HedgeType) -> usize {
        self.hedges.iter().filter(|h| **h == hedge).count()
    }

    /// Whether the tagged counts match the budget exactly.
    #[must_use]
    pub fn satisfies(&self, budget: HedgeBudget) -> bool {
        self.count(HedgeType::Half) == budget.half && self.count(HedgeType::Full) == budget.full
    }

    pub(crate) fn assign(&mut self, index: usize, set: OutcomeSet) {
        self.system.0[index] = set;
    }

    pub(crate) fn swap_hedges(&mut self, i: usize, j: usize) {
        self.hedges.swap(i, j);
    }

    #[must_use]
    pub fn into_system(self) -> System {
        self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::Probabilities;
    use crate::domain::outcome::format_row;

    fn set(s: &str) -> OutcomeSet {
        s.parse().unwrap()
    }

    fn event(number: u32, odds: Probabilities) -> Event {
        Event::try_new(number, "A - B", odds, Probabilities::new(0.4, 0.35, 0.25)).unwrap()
    }

    #[test]
    fn combinations_of_nothing_is_one_empty_row() {
        let rows: Vec<_> = combinations(&[]).collect();
        assert_eq!(rows, vec![Vec::<Outcome>::new()]);
    }

    #[test]
    fn combinations_follow_cross_product_order() {
        let sets = [set("1X"), set("12")];
        let rows: Vec<String> = combinations(&sets).map(|r| format_row(&r)).collect();
        assert_eq!(rows, vec!["11", "12", "X1", "X2"]);
    }

    #[test]
    fn combinations_size_hint_is_exact() {
        let sets = [set("1X2"), set("X2"), set("1")];
        let mut rows = combinations(&sets);
        assert_eq!(rows.size_hint(), (6, Some(6)));
        rows.next();
        rows.next();
        assert_eq!(rows.size_hint(), (4, Some(4)));
        assert_eq!(rows.count(), 4);
    }

    #[test]
    fn system_round_trips_through_display() {
        let system: System = "1 x2, 1X2".parse().unwrap();
        assert_eq!(system.to_string(), "1 X2 1X2");
        assert_eq!(system.row_count(), 6);
        assert_eq!(system.count(HedgeType::Half), 1);
    }

    #[test]
    fn budget_rejects_overcommitted_round() {
        assert!(HedgeBudget::new(2, 2).check(3).is_err());
        assert!(HedgeBudget::new(0, 0).check(0).is_err());
        assert!(HedgeBudget::new(1, 2).check(3).is_ok());
        assert_eq!(HedgeBudget::new(1, 1).singles(5), 3);
    }

    #[test]
    fn greedy_places_full_then_half_then_favourites() {
        let events = vec![
            event(1, Probabilities::new(0.5, 0.3, 0.2)),
            event(2, Probabilities::new(0.2, 0.3, 0.5)),
            event(3, Probabilities::new(0.2, 0.5, 0.3)),
            event(4, Probabilities::new(0.2, 0.3, 0.5)),
        ];
        let state = SearchState::greedy(&events, HedgeBudget::new(1, 1)).unwrap();
        assert_eq!(state.system().to_string(), "1X2 1X X 2");
        assert_eq!(
            state.hedges(),
            &[
                HedgeType::Full,
                HedgeType::Half,
                HedgeType::Single,
                HedgeType::Single
            ]
        );
        assert!(state.satisfies(HedgeBudget::new(1, 1)));
    }

    #[test]
    fn greedy_rejects_invalid_budget() {
        let events = vec![event(1, Probabilities::new(0.5, 0.3, 0.2))];
        let result = SearchState::greedy(&events, HedgeBudget::new(1, 1));
        assert!(matches!(
            result,
            Err(DomainError::InvalidConfiguration { .. })
        ));
    }
}
