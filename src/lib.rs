// clmm-hedge-core: concentrated-liquidity LP hedging simulator.
// loss-first architecture: impermanent loss accounting and the hedge overlay
// take priority. all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Side, Price, Quote, Timestamp, PriceTick
//   2.x  amm.rs: sqrt-price curve math, token composition, liquidity solve
//   3.x  tick.rs: price -> 0..100 tick position inside the active range
//   4.x  range.rs: range lifecycle, HODL reference, impermanent loss
//   5.x  hedge.rs: directional hedge state machine, stop-loss, pnl
//   6.x  fees.rs: fee accrual models, settled per closed range
//   7.x  config.rs: simulation config, presets, IL cap policy
//   8.x  events.rs: hedge and rebalance events for audit
//   9.x  engine/: tick loop, rebalancing, report assembly

// core simulation modules
pub mod amm;
pub mod engine;
pub mod events;
pub mod fees;
pub mod hedge;
pub mod range;
pub mod tick;
pub mod types;

// integration modules
pub mod config;

// re exports for convenience
pub use amm::*;
pub use engine::*;
pub use events::*;
pub use fees::*;
pub use hedge::*;
pub use range::*;
pub use tick::*;
pub use types::*;
pub use config::{ConfigError, IlCapPolicy, SimulationConfig};
