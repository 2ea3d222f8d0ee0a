//! `tipsedge sweep`: rank every affordable hedge budget.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::SweepArgs;
use super::optimize::spawn_interrupt_watcher;
use super::{output, settings};
use crate::application::search::SearchService;
use crate::application::solver::{Annealer, Optimized, Step};
use crate::domain::{stake_cost, DomainError, HedgeBudget};
use crate::error::Result;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Half")]
    half: usize,
    #[tabled(rename = "Full")]
    full: usize,
    #[tabled(rename = "Cost")]
    cost: Decimal,
    #[tabled(rename = "EV")]
    expected_value: String,
    #[tabled(rename = "System")]
    system: String,
}

/// Every `(half, full)` with `half + full <= events` whose stake cost is at
/// most `max_cost`, cheapest hedges first.
#[must_use]
pub fn affordable_budgets(events: usize, max_cost: Decimal) -> Vec<HedgeBudget> {
    let mut budgets = Vec::new();
    for full in 0..=events {
        for half in 0..=events - full {
            let budget = HedgeBudget::new(half, full);
            if stake_cost(budget) <= max_cost {
                budgets.push(budget);
            }
        }
    }
    budgets
}

/// Optimize each affordable budget concurrently and print the ranking.
///
/// Runs are independent and share one seed, so results are reproducible
/// with `--seed`.
pub async fn execute(args: SweepArgs) -> Result<()> {
    let config = settings::resolve(&args.settings, Some(&args.search))?;
    let round = settings::load_round(&args.round)?;

    let budgets = affordable_budgets(round.events.len(), args.max_cost);
    if budgets.is_empty() {
        return Err(DomainError::invalid_configuration(format!(
            "no hedge budget costs at most {}",
            args.max_cost
        ))
        .into());
    }

    let seed = config.annealing.seed.unwrap_or_else(rand::random);
    let iterations = config.annealing.max_iterations;
    let concurrency = num_cpus::get();
    let annealer = Annealer::new(config.annealing, config.estimator);

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::section("Sweep");
        output::field("Budgets", budgets.len());
        output::field("Max cost", args.max_cost);
        output::field("Seed", seed);
        output::field("Workers", concurrency);
    }

    let total = (iterations as u64).saturating_mul(budgets.len() as u64);
    let bar = output::progress(total, "sweeping");
    let ticker = bar.clone();
    let service = SearchService::new(annealer, round.events.clone(), round.pool_size(), concurrency)
        .with_progress(Arc::new(move |_: usize, _: &Step| ticker.inc(1)));

    let watcher = spawn_interrupt_watcher(service.cancel_flag());
    let results = service.sweep(&budgets, seed).await;
    watcher.abort();

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            output::spinner_fail(&bar, "sweep failed");
            return Err(e);
        }
    };
    output::spinner_success(&bar, &format!("{} budgets searched", results.len()));

    report(&results, args.top, seed);
    Ok(())
}

fn report(results: &[(HedgeBudget, Optimized)], top: usize, seed: u64) {
    if output::is_json() {
        let ranking: Vec<_> = results
            .iter()
            .map(|(budget, result)| {
                json!({
                    "half": budget.half,
                    "full": budget.full,
                    "stake_cost": stake_cost(*budget).to_string(),
                    "expected_value": result.expected_value,
                    "system": result.system(),
                    "cancelled": result.cancelled,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "sweep",
            "seed": seed,
            "results": ranking,
        }));
        return;
    }

    if results.iter().any(|(_, result)| result.cancelled) {
        output::warning("sweep interrupted, some budgets show partial searches");
    }

    output::section("Ranking");
    let rows: Vec<BudgetRow> = results
        .iter()
        .take(top.max(1))
        .enumerate()
        .map(|(i, (budget, result))| BudgetRow {
            rank: i + 1,
            half: budget.half,
            full: budget.full,
            cost: stake_cost(*budget),
            expected_value: format!("{:.2}", result.expected_value),
            system: result.system().to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    if results.len() > top {
        output::hint(&format!(
            "{} more budgets searched, use --top to show them",
            results.len() - top
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn budgets_respect_cost_and_event_count() {
        let budgets = affordable_budgets(13, dec!(96));
        assert!(budgets.contains(&HedgeBudget::new(0, 0)));
        // 2^5 * 3 = 96
        assert!(budgets.contains(&HedgeBudget::new(5, 1)));
        // 2^6 * 3 = 192
        assert!(!budgets.contains(&HedgeBudget::new(6, 1)));
        for budget in &budgets {
            assert!(budget.half + budget.full <= 13);
            assert!(stake_cost(*budget) <= dec!(96));
        }
    }

    #[test]
    fn small_round_caps_hedges_by_event_count() {
        let budgets = affordable_budgets(2, dec!(1000));
        assert_eq!(budgets.len(), 6);
        assert!(budgets.contains(&HedgeBudget::new(0, 2)));
        assert!(!budgets.contains(&HedgeBudget::new(2, 1)));
    }

    #[test]
    fn cost_below_one_leaves_nothing() {
        assert!(affordable_budgets(13, dec!(0.5)).is_empty());
    }
}
