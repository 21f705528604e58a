// 7.0 config.rs: all simulation settings in one place. capital, range width,
// hedge thresholds, fee model, IL cap policy.
// 7.1 presets mirror the strategy variants that were worth keeping: an unhedged
// baseline, the tuned 35/65 thresholds, and a tighter 40/60 variant.

use crate::fees::FeeModel;
use crate::hedge::HedgeParams;
use crate::types::Quote;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How hedge PnL offsets impermanent loss in the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IlCapPolicy {
    /// Hedged IL floors at zero. hedge profit beyond the realized IL is discarded.
    CappedAtZero,
    /// Hedged IL may go negative when hedge profit exceeds the realized IL.
    Uncapped,
}

impl IlCapPolicy {
    pub fn hedged_il(&self, unhedged_il: Quote, hedge_pnl: Quote) -> Quote {
        let net = unhedged_il.sub(hedge_pnl);
        match self {
            IlCapPolicy::CappedAtZero if net.is_negative() => Quote::zero(),
            _ => net,
        }
    }
}

/// Complete configuration for one simulation run. the engine reads everything
/// from here and nothing from anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// USD notional sized into the LP position and the hedge.
    pub capital: Quote,
    /// Full width of each range as a fraction of the entry price (0.01 = 1%).
    pub range_width_pct: Decimal,
    /// Hedge entry thresholds and stop distance in tick space.
    pub hedge: HedgeParams,
    pub fee_model: FeeModel,
    pub il_cap_policy: IlCapPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capital: Quote::new(dec!(2000)),
            range_width_pct: dec!(0.01),
            hedge: HedgeParams::default(),
            fee_model: FeeModel::AnnualApy { annual_rate: dec!(0.60) },
            il_cap_policy: IlCapPolicy::CappedAtZero,
        }
    }
}

impl SimulationConfig {
    // Unhedged benchmark. thresholds pushed outside tick space so the hedge
    // never enters and the run measures raw LP economics.
    pub fn baseline_unhedged() -> Self {
        let mut config = Self::default();
        config.hedge.short_threshold = dec!(-999);
        config.hedge.long_threshold = dec!(999);
        config
    }

    // The thresholds the parameter sweep settled on: short at 35, long at 65,
    // stop 15 ticks past the entry.
    pub fn optimal_hedged() -> Self {
        let mut config = Self::default();
        config.hedge = HedgeParams {
            short_threshold: dec!(35),
            long_threshold: dec!(65),
            stop_buffer: dec!(15),
        };
        config
    }

    // Narrower entries with tighter stops. trades more often, whipsaws more.
    pub fn tight_hedged() -> Self {
        let mut config = Self::default();
        config.hedge = HedgeParams {
            short_threshold: dec!(40),
            long_threshold: dec!(60),
            stop_buffer: dec!(10),
        };
        config
    }

    // Validate the configuration for internal consistency. crossed hedge
    // thresholds are allowed (short wins by precedence), so they are not
    // rejected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.capital.is_positive() {
            return Err(ConfigError::InvalidCapital {
                reason: "Capital must be positive".to_string(),
            });
        }

        if self.range_width_pct <= Decimal::ZERO {
            return Err(ConfigError::InvalidRangeWidth {
                reason: "Width must be positive".to_string(),
            });
        }

        // at width >= 2 the lower bound hits zero or below
        if self.range_width_pct >= dec!(2) {
            return Err(ConfigError::InvalidRangeWidth {
                reason: "Width of 2 or more collapses the lower bound".to_string(),
            });
        }

        if self.hedge.stop_buffer < Decimal::ZERO {
            return Err(ConfigError::InvalidHedge {
                reason: "Stop buffer must be non-negative".to_string(),
            });
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid capital: {reason}")]
    InvalidCapital { reason: String },

    #[error("Invalid range width: {reason}")]
    InvalidRangeWidth { reason: String },

    #[error("Invalid hedge params: {reason}")]
    InvalidHedge { reason: String },
}
