//! `tipsedge evaluate`: expected value of a hand-written system.

use serde_json::json;

use super::command::EvaluateArgs;
use super::{output, settings};
use crate::application::solver::Evaluator;
use crate::domain::{stake_cost, HedgeBudget, HedgeType, System};
use crate::error::Result;

/// Evaluate `--system` against the round.
///
/// Hedge types follow from each set's size, so any mix is accepted.
pub async fn execute(args: EvaluateArgs) -> Result<()> {
    let config = settings::resolve(&args.settings, None)?;
    let round = settings::load_round(&args.round)?;
    let system: System = args.system.parse()?;

    let budget = HedgeBudget::new(system.count(HedgeType::Half), system.count(HedgeType::Full));
    let pool_size = round.pool_size();
    let evaluator = Evaluator::new(config.estimator);

    let spinner = output::spinner(&format!("evaluating {} rows", system.row_count()));
    let events = round.events.clone();
    let task_system = system.clone();
    let evaluation = tokio::task::spawn_blocking(move || {
        evaluator.evaluate_detailed(&task_system, &events, pool_size)
    })
    .await?;

    let evaluation = match evaluation {
        Ok(evaluation) => evaluation,
        Err(e) => {
            output::spinner_fail(&spinner, "evaluation failed");
            return Err(e.into());
        }
    };
    output::spinner_success(&spinner, &format!("{} rows evaluated", evaluation.rows));

    if output::is_json() {
        output::json_output(json!({
            "command": "evaluate",
            "system": system,
            "expected_value": evaluation.value,
            "rows": evaluation.rows,
            "zeroed_rows": evaluation.zeroed,
            "half": budget.half,
            "full": budget.full,
            "stake_cost": stake_cost(budget).to_string(),
        }));
        return Ok(());
    }

    output::section("Evaluation");
    output::field("System", output::highlight(&system));
    output::field("Budget", budget);
    output::field("Stake cost", stake_cost(budget));
    output::field("Expected value", output::positive(format!("{:.2}", evaluation.value)));
    if evaluation.zeroed > 0 {
        output::warning(&format!(
            "{} degenerate rows counted as zero",
            evaluation.zeroed
        ));
    }

    Ok(())
}
