// 5.0: directional hedge state machine. at most one hedge lives at a time.
// entries trigger at extreme tick positions, exits via stop-loss or forced close
// when the range is abandoned. 5.1 has the transitions, 5.2 the pnl formula.

use crate::types::{Price, Quote, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Entry thresholds and stop distance, all in tick space (0..100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeParams {
    /// Enter a short when the tick falls to this or below.
    pub short_threshold: Decimal,
    /// Enter a long when the tick rises to this or above.
    pub long_threshold: Decimal,
    /// Distance from the entry threshold to the stop-loss trigger.
    pub stop_buffer: Decimal,
}

impl Default for HedgeParams {
    fn default() -> Self {
        Self {
            short_threshold: dec!(35),
            long_threshold: dec!(65),
            stop_buffer: dec!(15),
        }
    }
}

impl HedgeParams {
    /// Stop for a short sits above the entry threshold, capped at 95.
    pub fn short_stop_tick(&self) -> Decimal {
        (self.short_threshold + self.stop_buffer).min(dec!(95))
    }

    /// Stop for a long sits below the entry threshold, floored at 5.
    pub fn long_stop_tick(&self) -> Decimal {
        (self.long_threshold - self.stop_buffer).max(dec!(5))
    }
}

/// The hedge position as a tagged state, never a nullable record. makes every
/// transition exhaustive-checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hedge {
    NoHedge,
    Short { entry: Price, stop_tick: Decimal },
    Long { entry: Price, stop_tick: Decimal },
}

/// Why a hedge was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    StopLoss,
    RangeExit,
}

/// Record of an entry, returned so the engine can count and log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeOpen {
    pub side: Side,
    pub entry: Price,
    pub stop_tick: Decimal,
}

/// Settlement record of a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeClose {
    pub side: Side,
    pub entry: Price,
    pub exit: Price,
    pub pnl: Quote,
    pub reason: CloseReason,
}

impl HedgeClose {
    fn settle(side: Side, entry: Price, exit: Price, capital: Quote, reason: CloseReason) -> Self {
        Self {
            side,
            entry,
            exit,
            pnl: hedge_pnl(side, entry, exit, capital),
            reason,
        }
    }

    /// A stop-loss close that settled at a loss.
    pub fn is_whipsaw(&self) -> bool {
        self.reason == CloseReason::StopLoss && self.pnl.is_negative()
    }

    /// A forced close that settled at a profit.
    pub fn is_successful(&self) -> bool {
        self.reason == CloseReason::RangeExit && self.pnl.is_positive()
    }
}

impl Hedge {
    pub fn is_open(&self) -> bool {
        !matches!(self, Hedge::NoHedge)
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Hedge::NoHedge => None,
            Hedge::Short { .. } => Some(Side::Short),
            Hedge::Long { .. } => Some(Side::Long),
        }
    }

    // 5.1: entry. only from NoHedge. short is checked before long, so if the
    // thresholds cross, short wins.
    pub fn try_enter(&mut self, tick: Decimal, price: Price, params: &HedgeParams) -> Option<HedgeOpen> {
        if self.is_open() {
            return None;
        }

        if tick <= params.short_threshold {
            let stop_tick = params.short_stop_tick();
            *self = Hedge::Short { entry: price, stop_tick };
            Some(HedgeOpen { side: Side::Short, entry: price, stop_tick })
        } else if tick >= params.long_threshold {
            let stop_tick = params.long_stop_tick();
            *self = Hedge::Long { entry: price, stop_tick };
            Some(HedgeOpen { side: Side::Long, entry: price, stop_tick })
        } else {
            None
        }
    }

    /// Stop-loss check. shorts close when the tick rises to the stop, longs when
    /// it falls to it. evaluated after entry within the same tick, so a position
    /// opened this tick is immediately eligible.
    pub fn check_stop(&mut self, tick: Decimal, price: Price, capital: Quote) -> Option<HedgeClose> {
        let (side, entry) = match *self {
            Hedge::Short { entry, stop_tick } if tick >= stop_tick => (Side::Short, entry),
            Hedge::Long { entry, stop_tick } if tick <= stop_tick => (Side::Long, entry),
            _ => return None,
        };

        *self = Hedge::NoHedge;
        Some(HedgeClose::settle(side, entry, price, capital, CloseReason::StopLoss))
    }

    /// Forced close when the range is abandoned, settled at the exit price.
    pub fn force_close(&mut self, exit_price: Price, capital: Quote) -> Option<HedgeClose> {
        let (side, entry) = match *self {
            Hedge::Short { entry, .. } => (Side::Short, entry),
            Hedge::Long { entry, .. } => (Side::Long, entry),
            Hedge::NoHedge => return None,
        };

        *self = Hedge::NoHedge;
        Some(HedgeClose::settle(side, entry, exit_price, capital, CloseReason::RangeExit))
    }
}

// 5.2: the pnl formula. sign * (exit - entry) / entry * capital.
// shorts gain when price drops, longs gain when it rises.
pub fn hedge_pnl(side: Side, entry: Price, exit: Price, capital: Quote) -> Quote {
    let price_move = (exit.value() - entry.value()) / entry.value();
    capital.mul(side.sign() * price_move)
}
