// 2.0: concentrated-liquidity curve math. converts (price, range bounds, liquidity)
// into token composition. single bounded range, constant liquidity, sqrt-price formulas.
// pure functions, no state.

use crate::types::{Price, Quote};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

/// Token composition of an LP position at some price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmounts {
    pub base: Decimal,
    pub quote: Decimal,
}

impl TokenAmounts {
    pub fn new(base: Decimal, quote: Decimal) -> Self {
        Self { base, quote }
    }

    /// Mark-to-market value in quote currency.
    pub fn value_at(&self, price: Price) -> Quote {
        Quote::new(self.base * price.value() + self.quote)
    }
}

// sqrt returns None only for negative input. prices are positive by construction,
// so this is total over every value the simulator feeds it.
fn sqrt(value: Decimal) -> Decimal {
    debug_assert!(value >= Decimal::ZERO);
    value.sqrt().unwrap_or(Decimal::ZERO)
}

// 2.1: composition of a range at a given price.
// below the range everything sits in base, above it everything in quote,
// inside it splits along the curve:
//   base  = L * (1/sqrt(p) - 1/sqrt(upper))
//   quote = L * (sqrt(p) - sqrt(lower))
pub fn composition(price: Price, lower: Price, upper: Price, liquidity: Decimal) -> TokenAmounts {
    debug_assert!(lower < upper);
    debug_assert!(liquidity > Decimal::ZERO);

    let sqrt_lower = sqrt(lower.value());
    let sqrt_upper = sqrt(upper.value());

    if price <= lower {
        let base = liquidity * (Decimal::ONE / sqrt_lower - Decimal::ONE / sqrt_upper);
        TokenAmounts::new(base, Decimal::ZERO)
    } else if price >= upper {
        let quote = liquidity * (sqrt_upper - sqrt_lower);
        TokenAmounts::new(Decimal::ZERO, quote)
    } else {
        let sqrt_price = sqrt(price.value());
        let base = liquidity * (Decimal::ONE / sqrt_price - Decimal::ONE / sqrt_upper);
        let quote = liquidity * (sqrt_price - sqrt_lower);
        TokenAmounts::new(base, quote)
    }
}

// 2.2: liquidity constant for a fresh range, solved from the quote leg at entry:
//   L = quote_amount / (sqrt(entry) - sqrt(lower))
// None when the bounds collapse under decimal rounding or the result is not positive.
pub fn solve_liquidity(entry: Price, lower: Price, quote_amount: Quote) -> Option<Decimal> {
    let denominator = sqrt(entry.value()) - sqrt(lower.value());
    if denominator <= Decimal::ZERO {
        return None;
    }

    let liquidity = quote_amount.value() / denominator;
    if liquidity > Decimal::ZERO {
        Some(liquidity)
    } else {
        None
    }
}
