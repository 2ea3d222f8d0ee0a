//! `tipsedge optimize`: best system for one hedge budget.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::json;
use tabled::{Table, Tabled};
use tracing::info;

use super::command::OptimizeArgs;
use super::{output, settings};
use crate::application::search::SearchService;
use crate::application::solver::{Annealer, Optimized, Step};
use crate::domain::{stake_cost, HedgeBudget, Round};
use crate::error::Result;

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Match")]
    description: String,
    #[tabled(rename = "Pick")]
    pick: String,
    #[tabled(rename = "Cover")]
    hedge: String,
}

/// Run the annealer for one budget and print the best system.
pub async fn execute(args: OptimizeArgs) -> Result<()> {
    let config = settings::resolve(&args.settings, Some(&args.search))?;
    let round = settings::load_round(&args.round)?;
    let budget = HedgeBudget::new(args.half, args.full);
    budget.check(round.events.len())?;

    let seed = config.annealing.seed.unwrap_or_else(rand::random);
    let chains = config.annealing.chains;
    let total = config.annealing.max_iterations.saturating_mul(chains) as u64;
    let annealer = Annealer::new(config.annealing, config.estimator);

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::section("Search");
        output::field("Budget", budget);
        output::field("Rows", stake_cost(budget));
        output::field("Seed", seed);
        if chains > 1 {
            output::field("Chains", chains);
        }
    }

    let bar = output::progress(total, "annealing");
    let ticker = bar.clone();
    let service = SearchService::new(annealer, round.events.clone(), round.pool_size(), chains)
        .with_progress(Arc::new(move |_: usize, step: &Step| {
            ticker.inc(1);
            if step.improved {
                ticker.set_message(format!("best {:.2}", step.best_value));
            }
        }));

    let watcher = spawn_interrupt_watcher(service.cancel_flag());
    let result = service.run_chains(budget, seed, chains).await;
    watcher.abort();

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            output::spinner_fail(&bar, "search failed");
            return Err(e);
        }
    };
    output::spinner_success(&bar, &format!("best {:.2}", result.expected_value));

    report(&round, budget, seed, &result);
    Ok(())
}

/// Set `cancel` on Ctrl-C so running chains stop at the next iteration.
pub(super) fn spawn_interrupt_watcher(cancel: Arc<AtomicBool>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping search");
            cancel.store(true, Ordering::Relaxed);
        }
    })
}

fn report(round: &Round, budget: HedgeBudget, seed: u64, result: &Optimized) {
    if output::is_json() {
        output::json_output(json!({
            "command": "optimize",
            "half": budget.half,
            "full": budget.full,
            "seed": seed,
            "system": result.system(),
            "expected_value": result.expected_value,
            "stake_cost": stake_cost(budget).to_string(),
            "iterations": result.iterations,
            "accepted": result.accepted,
            "improvements": result.improvements,
            "cancelled": result.cancelled,
        }));
        return;
    }

    if result.cancelled {
        output::warning(&format!(
            "search interrupted after {} iterations, showing best so far",
            result.iterations
        ));
    }

    output::section("System");
    let rows: Vec<PickRow> = round
        .events
        .iter()
        .zip(result.system().sets())
        .map(|(event, set)| PickRow {
            number: event.number(),
            description: event.description().to_string(),
            pick: set.to_string(),
            hedge: set.hedge_type().to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::section("Result");
    output::field("Expected value", output::positive(format!("{:.2}", result.expected_value)));
    output::field("Stake cost", stake_cost(budget));
    output::field("Coupon", output::highlight(result.system()));
    output::field(
        "Accepted",
        output::muted(format!("{}/{}", result.accepted, result.iterations)),
    );
}
