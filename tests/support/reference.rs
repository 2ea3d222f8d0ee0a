//! Literal transcription of the row-value model, kept separate from the
//! crate's estimator so the two can be checked against each other.

use tipsedge::domain::{Event, Outcome};

fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = ((((1.061405429 * t - 1.453152027) * t) + 1.421413741) * t - 0.284496736) * t
        + 0.254829592;
    sign * (1.0 - poly * t * (-x * x).exp())
}

fn phi(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / 2f64.sqrt()))
}

fn density(t: f64) -> f64 {
    (-t * t / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Row value with the integrand evaluated at every Simpson node, the way
/// the model is written down, over `[-6, 6]` with 1000 subintervals.
pub fn row_value(row: &[Outcome], events: &[Event], pool: u64) -> f64 {
    let shares: Vec<f64> = row.iter().zip(events).map(|(o, e)| e.public().get(*o)).collect();
    let odds: f64 = row.iter().zip(events).map(|(o, e)| e.odds().get(*o)).product();
    let share_product: f64 = shares.iter().product();
    if share_product == 0.0 {
        return 0.0;
    }

    let sum: f64 = shares.iter().sum();
    let var: f64 = shares.iter().map(|f| f * (1.0 - f)).sum();
    let m = (row.len() as f64 - sum) / var.sqrt();
    let n = pool as f64 + 1.0;
    let adjustment =
        phi(0.5 + m).powf(n) - phi(-0.5 + m).powf(n) - phi(0.5 + m) + phi(-0.5 + m);

    let intervals = 1000;
    let h = 12.0 / intervals as f64;
    let integrand = |t: f64| adjustment * density(t);
    let mut total = integrand(-6.0) + integrand(6.0);
    for k in 1..intervals {
        let weight = if k % 2 == 1 { 4.0 } else { 2.0 };
        total += weight * integrand(-6.0 + k as f64 * h);
    }

    odds / share_product * (total * h / 3.0)
}
