// 9.0: simulation engine. walks the price series in order, coordinates the
// LP composition, hedge transitions, and range rebalances.
// deterministic and event-driven with no external I/O.

mod core;
mod rebalance;
mod results;

pub use core::{build_series, run_simulation, validate_series, Engine};
pub use results::{Accumulators, DataError, SimulationError, SimulationReport};
