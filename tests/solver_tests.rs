//! End-to-end properties of the estimator, evaluator, moves and annealer.

mod support;

use std::sync::atomic::AtomicBool;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tipsedge::application::solver::{
    estimate_row_value, propose_neighbor, Evaluator, NoopObserver, Step,
};
use tipsedge::domain::{
    combinations, parse_row, DomainError, HedgeBudget, HedgeType, Outcome, OutcomeSet,
    SearchState, System,
};
use tipsedge::testkit::config::annealer;
use tipsedge::testkit::domain::{events, round_events};

use support::assertions::assert_close;
use support::reference;

const ONE_EVENT: [((f64, f64, f64), (f64, f64, f64)); 1] = [((0.5, 0.3, 0.2), (0.4, 0.35, 0.25))];

#[test]
fn single_event_greedy_pick_matches_reference() {
    let events = events(&ONE_EVENT);
    let result = annealer(0)
        .optimize(&events, 1000, HedgeBudget::default(), &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(result.system().to_string(), "1");
    let expected = reference::row_value(&[Outcome::Home], &events, 1000);
    assert_close(result.expected_value, expected, 1e-9);
}

#[test]
fn single_event_search_keeps_the_best_single() {
    let events = events(&ONE_EVENT);
    let best = Outcome::ALL
        .iter()
        .map(|o| estimate_row_value(&[*o], &events, 1000).unwrap())
        .fold(f64::NEG_INFINITY, f64::max);

    let result = annealer(200)
        .optimize(&events, 1000, HedgeBudget::default(), &mut StdRng::seed_from_u64(3))
        .unwrap();

    assert_close(result.expected_value, best, 1e-12);
    assert_eq!(result.system().count(HedgeType::Single), 1);
}

#[test]
fn estimator_matches_literal_integration() {
    let events = round_events(8);
    for row in ["11111111", "X2X21X1X", "22222222", "1X21X21X"] {
        let row = parse_row(row).unwrap();
        let expected = reference::row_value(&row, &events, 250_000);
        let actual = estimate_row_value(&row, &events, 250_000).unwrap();
        assert_close(actual, expected, 1e-9);
    }
}

#[test]
fn all_full_round_expands_to_every_row_and_cannot_move() {
    let events = round_events(3);
    let budget = HedgeBudget::new(0, 3);
    let state = SearchState::greedy(&events, budget).unwrap();
    assert_eq!(state.system().to_string(), "1X2 1X2 1X2");

    let evaluation = Evaluator::default()
        .evaluate_detailed(state.system(), &events, 10_000)
        .unwrap();
    assert_eq!(evaluation.rows, 27);

    for seed in 0..200 {
        let neighbor = propose_neighbor(&state, budget, &mut StdRng::seed_from_u64(seed));
        assert_eq!(neighbor, state);
    }

    let result = annealer(100)
        .optimize(&events, 10_000, budget, &mut StdRng::seed_from_u64(7))
        .unwrap();
    assert_eq!(result.state, state);
    assert_eq!(result.improvements, 0);
}

#[test]
fn evaluation_is_the_sum_over_the_cross_product() {
    let events = round_events(4);
    let system: System = "1X X2 1 12".parse().unwrap();
    let expected: f64 = combinations(system.sets())
        .map(|row| estimate_row_value(&row, &events, 50_000).unwrap())
        .sum();

    let actual = Evaluator::default().evaluate(&system, &events, 50_000).unwrap();
    assert_eq!(system.row_count(), 8);
    assert_close(actual, expected, 1e-12);
}

#[test]
fn all_singles_system_is_one_row() {
    let events = round_events(5);
    let system: System = "1 X 2 1 2".parse().unwrap();
    let evaluation = Evaluator::default()
        .evaluate_detailed(&system, &events, 80_000)
        .unwrap();

    assert_eq!(evaluation.rows, 1);
    let row = parse_row("1X212").unwrap();
    assert_eq!(evaluation.value, estimate_row_value(&row, &events, 80_000).unwrap());
}

#[test]
fn row_value_is_invariant_under_co_permutation() {
    let events = round_events(6);
    let row = parse_row("1X2X21").unwrap();
    let value = estimate_row_value(&row, &events, 40_000).unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let mut order: Vec<usize> = (0..events.len()).collect();
        order.shuffle(&mut rng);
        let permuted_events: Vec<_> = order.iter().map(|&i| events[i].clone()).collect();
        let permuted_row: Vec<_> = order.iter().map(|&i| row[i]).collect();
        let permuted = estimate_row_value(&permuted_row, &permuted_events, 40_000).unwrap();
        assert_close(permuted, value, 1e-12);
    }
}

#[test]
fn neighbors_preserve_hedge_counts_along_a_walk() {
    let events = round_events(13);
    let budget = HedgeBudget::new(4, 2);
    let mut state = SearchState::greedy(&events, budget).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..5_000 {
        let next = propose_neighbor(&state, budget, &mut rng);
        assert_eq!(next.count(HedgeType::Half), 4);
        assert_eq!(next.count(HedgeType::Full), 2);
        for (set, hedge) in next.system().sets().iter().zip(next.hedges()) {
            assert_eq!(set.hedge_type(), *hedge);
        }
        state = next;
    }
}

#[test]
fn neighbor_never_touches_its_input() {
    let events = round_events(6);
    let budget = HedgeBudget::new(2, 1);
    let state = SearchState::greedy(&events, budget).unwrap();
    let before = state.clone();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let _ = propose_neighbor(&state, budget, &mut rng);
    }
    assert_eq!(state, before);
}

#[test]
fn optimizer_is_reproducible_with_a_seed() {
    let events = round_events(8);
    let budget = HedgeBudget::new(2, 1);
    let run = |seed| {
        annealer(300)
            .optimize(&events, 100_000, budget, &mut StdRng::seed_from_u64(seed))
            .unwrap()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn best_value_is_monotone_and_returned() {
    let events = round_events(8);
    let budget = HedgeBudget::new(3, 1);
    let mut steps: Vec<Step> = Vec::new();
    let mut record = |step: &Step| steps.push(*step);

    let result = annealer(400)
        .optimize_with(
            &events,
            100_000,
            budget,
            &mut StdRng::seed_from_u64(8),
            &AtomicBool::new(false),
            &mut record,
        )
        .unwrap();

    assert!(steps.windows(2).all(|w| w[1].best_value >= w[0].best_value));
    assert!(steps.iter().all(|s| s.current_value <= result.expected_value));
    assert!(result.state.satisfies(budget));
    let greedy = SearchState::greedy(&events, budget).unwrap();
    let greedy_value = Evaluator::default()
        .evaluate(greedy.system(), &events, 100_000)
        .unwrap();
    assert!(result.expected_value >= greedy_value);
}

#[test]
fn overcommitted_budget_is_invalid_configuration() {
    let events = round_events(3);
    let result = annealer(10).optimize_with(
        &events,
        1_000,
        HedgeBudget::new(2, 2),
        &mut StdRng::seed_from_u64(0),
        &AtomicBool::new(false),
        &mut NoopObserver,
    );
    assert!(matches!(result, Err(DomainError::InvalidConfiguration { .. })));
}

#[test]
fn degenerate_rows_abort_by_default() {
    // Every picked share is one: zero variance.
    let events = events(&[
        ((0.6, 0.3, 0.1), (1.0, 0.0, 0.0)),
        ((0.5, 0.3, 0.2), (1.0, 0.0, 0.0)),
    ]);
    let system = System::new(vec![OutcomeSet::single(Outcome::Home); 2]);
    let result = Evaluator::default().evaluate(&system, &events, 1_000);
    assert!(matches!(
        result,
        Err(DomainError::DegenerateProbabilityModel { .. })
    ));
}
