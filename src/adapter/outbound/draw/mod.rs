//! Round data from saved provider draw lists.
//!
//! Converts the provider's draw-list JSON into a validated [`Round`]. The
//! first draw in the list is the open one. Odds-implied probabilities come
//! from `favouriteOdds` and fall back to the public shares when an event
//! has none.

pub mod dto;

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use self::dto::{DrawDto, DrawEventDto, DrawsResponse, Numeric, PercentTriple};
use crate::domain::{Event, Probabilities, Product, Round};
use crate::error::{Result, RoundError};
use crate::port::RoundSource;

/// Parse a draw-list response into the open round.
///
/// # Errors
///
/// Fails on malformed JSON, an empty draw list, unparseable numbers, a
/// missing or non-positive turnover, an unknown product, or an event whose
/// probabilities do not validate.
pub fn parse_draws(json: &str) -> Result<Round> {
    let response: DrawsResponse = serde_json::from_str(json).map_err(RoundError::from)?;
    let draw = response.draws.into_iter().next().ok_or(RoundError::NoDraw)?;
    to_round(draw)
}

fn to_round(draw: DrawDto) -> Result<Round> {
    let product = draw
        .product_name
        .parse::<Product>()
        .map_err(|_| RoundError::InvalidField {
            field: "productName",
            value: draw.product_name.clone(),
        })?;

    // Without a turnover every row is worth nothing.
    let turnover = match &draw.current_net_sale {
        Some(n) => n
            .as_decimal()
            .filter(|t| *t > Decimal::ZERO)
            .ok_or_else(|| RoundError::InvalidField {
                field: "currentNetSale",
                value: n.raw(),
            })?,
        None => {
            return Err(RoundError::InvalidField {
                field: "currentNetSale",
                value: "missing".to_string(),
            }
            .into())
        }
    };
    let jackpot = draw
        .jackpot
        .as_ref()
        .and_then(Numeric::as_decimal)
        .unwrap_or(Decimal::ZERO);

    let events = draw
        .draw_events
        .iter()
        .map(to_event)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        product = %product,
        draw = draw.draw_number,
        events = events.len(),
        turnover = %turnover,
        "parsed draw"
    );

    Ok(Round {
        product,
        draw_number: draw.draw_number,
        turnover,
        jackpot,
        events,
    })
}

fn to_event(dto: &DrawEventDto) -> Result<Event> {
    let public = percent_triple(&dto.svenska_folket, "svenskaFolket")?;
    let odds = match &dto.favourite_odds {
        Some(odds) => percent_triple(odds, "favouriteOdds")?,
        None => {
            warn!(
                event = dto.event_number,
                "no favourite odds, using public shares as probabilities"
            );
            public
        }
    };
    Ok(Event::try_new(
        dto.event_number,
        dto.event_description.trim(),
        odds,
        public,
    )?)
}

fn percent_triple(triple: &PercentTriple, field: &'static str) -> Result<Probabilities> {
    let pct = |n: &Numeric| {
        n.as_f64()
            .map(|v| v / 100.0)
            .ok_or_else(|| RoundError::InvalidField { field, value: n.raw() })
    };
    Ok(Probabilities::new(
        pct(&triple.one)?,
        pct(&triple.x)?,
        pct(&triple.two)?,
    ))
}

/// [`RoundSource`] backed by a saved draw-list file.
#[derive(Debug, Clone)]
pub struct DrawFile {
    path: PathBuf,
}

impl DrawFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RoundSource for DrawFile {
    fn name(&self) -> &str {
        "draw-file"
    }

    fn load(&self) -> Result<Round> {
        let json = std::fs::read_to_string(&self.path).map_err(RoundError::ReadFile)?;
        parse_draws(&json)
    }
}
