//! Draw-list JSON documents in the provider's format.

use serde_json::json;

use super::domain::Triple;

fn percent(triple: Triple) -> serde_json::Value {
    // Provider sends percentages as strings with a decimal comma.
    let text = |v: f64| format!("{:.2}", v * 100.0).replace('.', ",");
    json!({ "one": text(triple.0), "x": text(triple.1), "two": text(triple.2) })
}

/// A one-draw Stryktipset list with the given `(odds, public)` events.
pub fn draws_json(turnover: &str, pairs: &[(Triple, Triple)]) -> String {
    let events: Vec<_> = pairs
        .iter()
        .enumerate()
        .map(|(i, (odds, public))| {
            json!({
                "eventNumber": i + 1,
                "eventDescription": format!("Home {} - Away {}", i + 1, i + 1),
                "svenskaFolket": percent(*public),
                "favouriteOdds": percent(*odds),
            })
        })
        .collect();

    json!({
        "draws": [{
            "productName": "Stryktipset",
            "drawNumber": 4831,
            "currentNetSale": turnover,
            "drawEvents": events,
        }]
    })
    .to_string()
}

/// Three-event round with a 1 000 000 turnover.
pub fn small_round_json() -> String {
    draws_json(
        "1000000,00",
        &[
            ((0.50, 0.30, 0.20), (0.40, 0.35, 0.25)),
            ((0.25, 0.30, 0.45), (0.20, 0.30, 0.50)),
            ((0.70, 0.20, 0.10), (0.80, 0.15, 0.05)),
        ],
    )
}
