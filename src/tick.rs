// 3.0: tick mapping. normalizes a raw price into a 0..100 position inside the
// active range. linear price interpolation, NOT the log-price tick convention
// real AMM protocols use. callers must not conflate the two.

use crate::types::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Where a price sits relative to the active range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickPosition {
    /// Clamped to [0, 100]. 0 at or below the lower bound, 100 at or above the upper.
    pub position: Decimal,
    /// True only strictly inside the range. a price sitting exactly on a bound
    /// counts as out of range and triggers a rebalance.
    pub in_range: bool,
}

// 3.1: (price - lower) / (upper - lower) * 100, clamped. in_range checks the raw
// value before clamping.
pub fn tick_position(price: Price, lower: Price, upper: Price) -> TickPosition {
    debug_assert!(lower < upper);

    let raw = (price.value() - lower.value()) / (upper.value() - lower.value()) * dec!(100);

    TickPosition {
        position: raw.max(Decimal::ZERO).min(dec!(100)),
        in_range: raw > Decimal::ZERO && raw < dec!(100),
    }
}
