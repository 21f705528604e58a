// 4.0: active liquidity range. owns the bounds, the liquidity constant, and the
// token amounts frozen at open time. those frozen amounts are the HODL reference
// for impermanent loss when the range closes.

use crate::amm::{self, TokenAmounts};
use crate::tick::{tick_position, TickPosition};
use crate::types::{Price, Quote, Timestamp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub lower: Price,
    pub upper: Price,
    pub liquidity: Decimal,
    /// Composition at open, frozen for the lifetime of the range.
    pub start_amounts: TokenAmounts,
    pub opened_at: Timestamp,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RangeError {
    #[error("Degenerate range bounds: lower {lower}, upper {upper}")]
    DegenerateBounds { lower: Decimal, upper: Decimal },

    #[error("Range bound is not positive: {value}")]
    BoundNotPositive { value: Decimal },

    #[error("Derived liquidity is not positive for entry price {entry}")]
    NonPositiveLiquidity { entry: Decimal },
}

impl Range {
    // 4.1: open a fresh range centered on the entry price. capital splits 50/50
    // by value, bounds sit at entry * (1 -+ width/2), liquidity is solved from the
    // quote leg. a non-positive width collapses the bounds and is rejected here
    // even if config validation was skipped.
    pub fn open(
        entry: Price,
        capital: Quote,
        range_width_pct: Decimal,
        opened_at: Timestamp,
    ) -> Result<Self, RangeError> {
        let half_width = range_width_pct / dec!(2);
        let lower_value = entry.value() * (Decimal::ONE - half_width);
        let upper_value = entry.value() * (Decimal::ONE + half_width);

        let lower = Price::new(lower_value)
            .ok_or(RangeError::BoundNotPositive { value: lower_value })?;
        let upper = Price::new(upper_value)
            .ok_or(RangeError::BoundNotPositive { value: upper_value })?;

        if lower >= upper {
            return Err(RangeError::DegenerateBounds {
                lower: lower_value,
                upper: upper_value,
            });
        }

        let half_capital = capital.value() / dec!(2);
        let base_amount = half_capital / entry.value();
        let quote_amount = Quote::new(half_capital);

        let liquidity = amm::solve_liquidity(entry, lower, quote_amount)
            .ok_or(RangeError::NonPositiveLiquidity { entry: entry.value() })?;

        Ok(Self {
            lower,
            upper,
            liquidity,
            start_amounts: TokenAmounts::new(base_amount, quote_amount.value()),
            opened_at,
        })
    }

    pub fn composition_at(&self, price: Price) -> TokenAmounts {
        amm::composition(price, self.lower, self.upper, self.liquidity)
    }

    pub fn tick_at(&self, price: Price) -> TickPosition {
        tick_position(price, self.lower, self.upper)
    }

    /// Value of the frozen open amounts at the given price.
    pub fn hodl_value_at(&self, price: Price) -> Quote {
        self.start_amounts.value_at(price)
    }

    /// Value of the rebalanced LP composition at the given price.
    pub fn lp_value_at(&self, price: Price) -> Quote {
        self.composition_at(price).value_at(price)
    }

    // 4.2: impermanent loss against the HODL reference. positive whenever the
    // exit price has drifted from entry, zero (up to rounding) at entry.
    pub fn impermanent_loss_at(&self, exit_price: Price) -> Quote {
        self.hodl_value_at(exit_price).sub(self.lp_value_at(exit_price))
    }
}
