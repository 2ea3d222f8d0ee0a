//! Draw-list response types.
//!
//! The provider answers with a list of open draws. Numbers are sent as
//! strings (sometimes with a decimal comma), so every numeric field goes
//! through [`Numeric`].
//!
//! Example (abridged):
//! ```json
//! {"draws":[{"productName":"Stryktipset","drawNumber":4831,
//!   "currentNetSale":"10734552,00",
//!   "drawEvents":[{"eventNumber":1,"eventDescription":"Arsenal - Chelsea",
//!     "svenskaFolket":{"one":"48","x":"27","two":"25"},
//!     "favouriteOdds":{"one":"45","x":"28","two":"27"}}]}]}
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

/// Top-level draw-list response.
#[derive(Debug, Deserialize)]
pub struct DrawsResponse {
    #[serde(default)]
    pub draws: Vec<DrawDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawDto {
    pub product_name: String,
    pub draw_number: u32,
    pub current_net_sale: Option<Numeric>,
    #[serde(default)]
    pub jackpot: Option<Numeric>,
    #[serde(default)]
    pub draw_events: Vec<DrawEventDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawEventDto {
    pub event_number: u32,
    pub event_description: String,
    pub svenska_folket: PercentTriple,
    /// Missing for events the bookmakers have not priced.
    #[serde(default)]
    pub favourite_odds: Option<PercentTriple>,
}

/// Percentages for (`1`, `X`, `2`).
#[derive(Debug, Deserialize)]
pub struct PercentTriple {
    pub one: Numeric,
    pub x: Numeric,
    pub two: Numeric,
}

/// Number sent either as JSON number or as text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn normalized(text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    }

    /// Value as a float, `None` if the text is not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(t) => Self::normalized(t).parse().ok(),
        }
    }

    /// Value as a decimal, `None` if the text is not a number.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(n) => Decimal::try_from(*n).ok(),
            Self::Text(t) => Self::normalized(t).parse().ok(),
        }
    }

    /// Raw form, for error messages.
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(t) => t.clone(),
        }
    }
}
