//! Neighbourhood moves that keep the hedge counts fixed.
//!
//! Two moves, picked with equal probability:
//!
//! - **Resample**: give one event a different outcome set of the same hedge
//!   type. Full-cover events have no alternative, so the move is a no-op.
//! - **Type swap**: swap the hedge tags of two distinct events and draw a
//!   fresh outcome set for each. Proposals whose half/full counts no longer
//!   match the budget are rejected, returning the input state.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{HedgeBudget, HedgeType, OutcomeSet, SearchState};

/// Propose a neighbour of `state`.
///
/// The input is never modified; the result is either a mutated clone or a
/// value-equal copy of the input.
pub fn propose_neighbor<R: Rng + ?Sized>(
    state: &SearchState,
    budget: HedgeBudget,
    rng: &mut R,
) -> SearchState {
    if state.is_empty() {
        return state.clone();
    }
    if rng.gen_bool(0.5) {
        resample(state, rng)
    } else {
        swap_types(state, budget, rng)
    }
}

fn resample<R: Rng + ?Sized>(state: &SearchState, rng: &mut R) -> SearchState {
    let i = rng.gen_range(0..state.len());
    let hedge = state.hedges()[i];
    if hedge == HedgeType::Full {
        return state.clone();
    }

    let current = state.system().sets()[i];
    let alternatives: Vec<OutcomeSet> = hedge
        .options()
        .iter()
        .copied()
        .filter(|set| *set != current)
        .collect();

    let mut next = state.clone();
    if let Some(set) = alternatives.choose(rng) {
        next.assign(i, *set);
    }
    next
}

fn swap_types<R: Rng + ?Sized>(state: &SearchState, budget: HedgeBudget, rng: &mut R) -> SearchState {
    let n = state.len();
    if n < 2 {
        return state.clone();
    }

    let i = rng.gen_range(0..n);
    let mut j = rng.gen_range(0..n - 1);
    if j >= i {
        j += 1;
    }

    let mut next = state.clone();
    next.swap_hedges(i, j);
    for index in [i, j] {
        let options = next.hedges()[index].options();
        if let Some(set) = options.choose(rng) {
            next.assign(index, *set);
        }
    }

    if !next.satisfies(budget) {
        return state.clone();
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::System;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(s: &str) -> SearchState {
        SearchState::from_system(s.parse::<System>().unwrap())
    }

    #[test]
    fn proposals_keep_hedge_counts() {
        let budget = HedgeBudget::new(2, 1);
        let mut current = state("1 X2 1X2 2 1X X");
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2_000 {
            let next = propose_neighbor(&current, budget, &mut rng);
            assert!(next.satisfies(budget));
            for (set, hedge) in next.system().sets().iter().zip(next.hedges()) {
                assert_eq!(set.hedge_type(), *hedge);
            }
            current = next;
        }
    }

    #[test]
    fn all_full_state_never_changes() {
        let budget = HedgeBudget::new(0, 3);
        let start = state("1X2 1X2 1X2");
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            assert_eq!(propose_neighbor(&start, budget, &mut rng), start);
        }
    }

    #[test]
    fn resample_always_changes_single_events() {
        let start = state("1");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let next = resample(&start, &mut rng);
            assert_ne!(next.system().sets()[0], start.system().sets()[0]);
            assert_eq!(next.hedges(), start.hedges());
        }
    }

    #[test]
    fn swap_on_single_event_is_identity() {
        let start = state("X2");
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(swap_types(&start, HedgeBudget::new(1, 0), &mut rng), start);
    }

    #[test]
    fn swap_moves_hedges_between_events() {
        let budget = HedgeBudget::new(1, 0);
        let start = state("1X 1 1 1");
        let mut rng = StdRng::seed_from_u64(21);

        let moved = (0..500)
            .map(|_| swap_types(&start, budget, &mut rng))
            .any(|next| next.hedges()[0] == HedgeType::Single);
        assert!(moved);
    }

    #[test]
    fn input_is_left_untouched() {
        let start = state("1 X 2 1X");
        let snapshot = start.clone();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let _ = propose_neighbor(&start, HedgeBudget::new(1, 0), &mut rng);
        }
        assert_eq!(start, snapshot);
    }
}
