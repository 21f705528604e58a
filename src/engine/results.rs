// 9.0.2: running totals, the final report, and errors for simulation runs.

use crate::config::{ConfigError, SimulationConfig};
use crate::range::RangeError;
use crate::types::Quote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals accumulated while the engine walks the series. settled amounts only:
/// fees, IL and hedge pnl land here at the moment they settle, never mark-to-market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accumulators {
    pub total_fees: Quote,
    pub total_il: Quote,
    pub total_hedge_pnl: Quote,

    pub ticks_processed: u64,
    pub ticks_in_range: u64,
    pub ticks_out_of_range: u64,
    pub entry_checks: u64,
    pub stop_checks: u64,

    pub rebalance_count: u32,
    pub hedge_entries: u32,
    pub hedge_stop_closes: u32,
    pub hedge_forced_closes: u32,
    pub whipsaw_count: u32,
    pub successful_hedges: u32,
}

impl Accumulators {
    pub fn new() -> Self {
        Self {
            total_fees: Quote::zero(),
            total_il: Quote::zero(),
            total_hedge_pnl: Quote::zero(),
            ticks_processed: 0,
            ticks_in_range: 0,
            ticks_out_of_range: 0,
            entry_checks: 0,
            stop_checks: 0,
            rebalance_count: 0,
            hedge_entries: 0,
            hedge_stop_closes: 0,
            hedge_forced_closes: 0,
            whipsaw_count: 0,
            successful_hedges: 0,
        }
    }
}

impl Default for Accumulators {
    fn default() -> Self {
        Self::new()
    }
}

/// Final report of a completed run. everything downstream analysis needs,
/// with the config echoed back so a report is self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,

    // tick accounting
    pub ticks_processed: u64,
    pub ticks_in_range: u64,
    pub ticks_out_of_range: u64,
    pub entry_checks: u64,
    pub stop_checks: u64,

    // lifecycle counts
    pub rebalance_count: u32,
    pub hedge_entries: u32,
    pub hedge_stop_closes: u32,
    pub hedge_forced_closes: u32,
    pub whipsaw_count: u32,
    pub successful_hedges: u32,

    // settled money
    pub total_fees: Quote,
    pub unhedged_il: Quote,
    pub total_hedge_pnl: Quote,
    /// IL after hedge offset, per the configured cap policy.
    pub hedged_il: Quote,
    /// Fees minus hedged IL.
    pub net_pnl: Quote,

    // derived metrics
    pub il_reduction_pct: Decimal,
    /// Successful hedges over all loss-relevant closes. zero when no hedge
    /// ever closed.
    pub win_rate_pct: Decimal,

    pub event_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Non-positive price at index {index}")]
    NonPositivePrice { index: usize },

    #[error("Timestamps go backwards at index {index}")]
    OutOfOrder { index: usize },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SimulationError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),
}
