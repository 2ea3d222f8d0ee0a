//! Pool rounds and their payout economics.
//!
//! None of this feeds the solver. It exists so operators can see what a
//! round is worth and what a hedge budget costs to stake.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::event::Event;
use super::system::HedgeBudget;

/// Pool product a round belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Product {
    Stryktipset,
    Europatipset,
    Topptipset,
}

impl Product {
    /// Share of turnover returned to the pool before tax.
    #[must_use]
    pub fn return_rate(self) -> Decimal {
        match self {
            Self::Stryktipset | Self::Europatipset => dec!(0.65),
            Self::Topptipset => dec!(0.725),
        }
    }

    /// Tax withheld from the returned share.
    #[must_use]
    pub fn tax_rate(self) -> Decimal {
        match self {
            Self::Stryktipset | Self::Europatipset => dec!(0.08),
            Self::Topptipset => dec!(0.25),
        }
    }

    /// Share of the net pot paid to the top prize tier.
    #[must_use]
    pub fn top_tier_share(self) -> Decimal {
        match self {
            Self::Stryktipset | Self::Europatipset => dec!(0.40),
            Self::Topptipset => Decimal::ONE,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stryktipset => "Stryktipset",
            Self::Europatipset => "Europatipset",
            Self::Topptipset => "Topptipset",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "stryktipset" => Ok(Self::Stryktipset),
            "europatipset" => Ok(Self::Europatipset),
            // The provider reports the whole family, e.g. "Topptipset Europa".
            name if name.starts_with("topptipset") => Ok(Self::Topptipset),
            _ => Err(format!("unknown product '{s}'")),
        }
    }
}

/// One open pool draw.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    pub product: Product,
    pub draw_number: u32,
    /// Total stakes so far, in kronor.
    pub turnover: Decimal,
    /// Carried-over jackpot added to the top tier.
    pub jackpot: Decimal,
    pub events: Vec<Event>,
}

impl Round {
    /// Turnover after the operator's cut and tax.
    #[must_use]
    pub fn net_pot(&self) -> Decimal {
        self.turnover * self.product.return_rate() * (Decimal::ONE - self.product.tax_rate())
    }

    /// Amount paid to the top prize tier.
    #[must_use]
    pub fn payout(&self) -> Decimal {
        self.net_pot() * self.product.top_tier_share() + self.jackpot
    }

    /// Turnover as the integer pool size the estimator models.
    #[must_use]
    pub fn pool_size(&self) -> u64 {
        self.turnover.trunc().to_u64().unwrap_or(0)
    }
}

/// Cost of staking a budget at one krona per row: `2^half * 3^full`.
#[must_use]
pub fn stake_cost(budget: HedgeBudget) -> Decimal {
    let rows = 2u128
        .checked_pow(budget.half as u32)
        .zip(3u128.checked_pow(budget.full as u32))
        .and_then(|(a, b)| a.checked_mul(b));
    rows.and_then(Decimal::from_u128).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(product: Product, turnover: Decimal) -> Round {
        Round {
            product,
            draw_number: 4321,
            turnover,
            jackpot: Decimal::ZERO,
            events: vec![],
        }
    }

    #[test]
    fn stryktipset_pays_forty_percent_of_net_pot() {
        let r = round(Product::Stryktipset, dec!(1000000));
        assert_eq!(r.net_pot(), dec!(598000));
        assert_eq!(r.payout(), dec!(239200));
    }

    #[test]
    fn topptipset_pays_whole_net_pot() {
        let r = round(Product::Topptipset, dec!(100000));
        assert_eq!(r.net_pot(), dec!(54375));
        assert_eq!(r.payout(), dec!(54375));
    }

    #[test]
    fn jackpot_lands_on_top_tier() {
        let mut r = round(Product::Europatipset, dec!(1000));
        r.jackpot = dec!(50);
        assert_eq!(r.payout(), dec!(289.2));
    }

    #[test]
    fn stake_cost_is_two_to_half_times_three_to_full() {
        assert_eq!(stake_cost(HedgeBudget::new(0, 0)), dec!(1));
        assert_eq!(stake_cost(HedgeBudget::new(3, 2)), dec!(72));
    }

    #[test]
    fn product_parses_provider_names() {
        assert_eq!("Stryktipset".parse::<Product>(), Ok(Product::Stryktipset));
        assert_eq!(
            "Topptipset Europa".parse::<Product>(),
            Ok(Product::Topptipset)
        );
        assert!("Lotto".parse::<Product>().is_err());
    }

    #[test]
    fn pool_size_truncates_turnover() {
        assert_eq!(round(Product::Stryktipset, dec!(1234.9)).pool_size(), 1234);
    }
}
