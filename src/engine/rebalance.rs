//! Range-exit settlement and rebalancing.

use super::core::Engine;
use super::results::SimulationError;
use crate::events::{EventPayload, HedgeForcedClosedEvent, RangeRebalancedEvent};
use crate::range::Range;
use crate::types::Price;

impl Engine {
    // 9.6: the exit path, in settlement order: fees for the closing range,
    // IL against the frozen open amounts, forced hedge close at the exit
    // price, then a fresh range centered on the exit.
    pub(super) fn rebalance(&mut self, exit_price: Price) -> Result<(), SimulationError> {
        let old = self.range;

        let duration_days = old.opened_at.elapsed_days(&self.current_time);
        let fees = self.config.fee_model.accrue(self.config.capital, duration_days);
        let il = old.impermanent_loss_at(exit_price);

        self.totals.total_fees = self.totals.total_fees.add(fees);
        self.totals.total_il = self.totals.total_il.add(il);

        if let Some(closed) = self.hedge.force_close(exit_price, self.config.capital) {
            self.totals.hedge_forced_closes += 1;
            if closed.is_successful() {
                self.totals.successful_hedges += 1;
            }
            self.totals.total_hedge_pnl = self.totals.total_hedge_pnl.add(closed.pnl);

            self.emit(EventPayload::HedgeForcedClosed(HedgeForcedClosedEvent {
                side: closed.side,
                entry_price: closed.entry,
                exit_price: closed.exit,
                pnl: closed.pnl,
                successful: closed.is_successful(),
            }));
        }

        let fresh = Range::open(
            exit_price,
            self.config.capital,
            self.config.range_width_pct,
            self.current_time,
        )?;

        self.totals.rebalance_count += 1;
        self.emit(EventPayload::RangeRebalanced(RangeRebalancedEvent {
            exit_price,
            old_lower: old.lower,
            old_upper: old.upper,
            new_lower: fresh.lower,
            new_upper: fresh.upper,
            duration_days,
            fees_accrued: fees,
            impermanent_loss: il,
        }));

        self.current_amounts = fresh.start_amounts;
        self.range = fresh;

        Ok(())
    }
}
