//! Builders for domain primitives used across tests.

use crate::domain::{Event, Probabilities};

/// Odds and public shares for one event, as `(home, draw, away)`.
pub type Triple = (f64, f64, f64);

/// Build a validated event.
///
/// # Panics
///
/// Panics if the probabilities do not validate.
pub fn event(number: u32, odds: Triple, public: Triple) -> Event {
    Event::try_new(
        number,
        format!("Home {number} - Away {number}"),
        Probabilities::new(odds.0, odds.1, odds.2),
        Probabilities::new(public.0, public.1, public.2),
    )
    .expect("test event probabilities must validate")
}

/// Events numbered from 1, one per `(odds, public)` pair.
pub fn events(pairs: &[(Triple, Triple)]) -> Vec<Event> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (odds, public))| event(i as u32 + 1, *odds, *public))
        .collect()
}

/// A mixed round of `n` events cycling through five market shapes:
/// favourites the public over-plays, under-plays, and open games.
pub fn round_events(n: usize) -> Vec<Event> {
    const SHAPES: [(Triple, Triple); 5] = [
        ((0.50, 0.30, 0.20), (0.40, 0.35, 0.25)),
        ((0.25, 0.30, 0.45), (0.20, 0.30, 0.50)),
        ((0.70, 0.20, 0.10), (0.80, 0.15, 0.05)),
        ((0.35, 0.35, 0.30), (0.45, 0.30, 0.25)),
        ((0.15, 0.25, 0.60), (0.10, 0.20, 0.70)),
    ];
    (0..n)
        .map(|i| {
            let (odds, public) = SHAPES[i % SHAPES.len()];
            event(i as u32 + 1, odds, public)
        })
        .collect()
}
