//! `tipsedge round`: pool economics and the event table.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::RoundArgs;
use super::{output, settings};
use crate::domain::{Event, Outcome, Round};
use crate::error::Result;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Match")]
    description: String,
    #[tabled(rename = "Odds 1")]
    odds_home: String,
    #[tabled(rename = "X")]
    odds_draw: String,
    #[tabled(rename = "2")]
    odds_away: String,
    #[tabled(rename = "Public 1")]
    public_home: String,
    #[tabled(rename = "X")]
    public_draw: String,
    #[tabled(rename = "2")]
    public_away: String,
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        let odds = event.odds();
        let public = event.public();
        Self {
            number: event.number(),
            description: event.description().to_string(),
            odds_home: percent(odds.get(Outcome::Home)),
            odds_draw: percent(odds.get(Outcome::Draw)),
            odds_away: percent(odds.get(Outcome::Away)),
            public_home: percent(public.get(Outcome::Home)),
            public_draw: percent(public.get(Outcome::Draw)),
            public_away: percent(public.get(Outcome::Away)),
        }
    }
}

/// Print the round summary.
pub fn execute(args: &RoundArgs) -> Result<()> {
    settings::resolve(&args.settings, None)?;
    let round = settings::load_round(&args.round)?;

    if output::is_json() {
        output::json_output(round_json(&round));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Round");
    output::field("Product", &round.product);
    output::field("Draw", round.draw_number);
    output::field("Events", round.events.len());
    output::field("Turnover", round.turnover.round_dp(0));
    output::field("Net pot", round.net_pot().round_dp(0));
    output::field("Payout", output::highlight(round.payout().round_dp(0)));

    output::section("Events");
    let rows: Vec<EventRow> = round.events.iter().map(EventRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    Ok(())
}

fn round_json(round: &Round) -> serde_json::Value {
    let events: Vec<_> = round
        .events
        .iter()
        .map(|event| {
            json!({
                "number": event.number(),
                "description": event.description(),
                "odds": event.odds(),
                "public": event.public(),
            })
        })
        .collect();

    json!({
        "command": "round",
        "product": round.product.to_string(),
        "draw_number": round.draw_number,
        "turnover": round.turnover.to_string(),
        "net_pot": round.net_pot().to_string(),
        "payout": round.payout().to_string(),
        "pool_size": round.pool_size(),
        "events": events,
    })
}
