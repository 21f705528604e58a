// 9.0 engine/core.rs: main engine. holds the active range, the hedge state,
// the running totals, and the event log.

use super::results::{Accumulators, DataError, SimulationError, SimulationReport};
use crate::amm::TokenAmounts;
use crate::config::SimulationConfig;
use crate::events::{Event, EventCollector, EventEmitter, EventPayload, HedgeOpenedEvent, HedgeStoppedEvent};
use crate::hedge::Hedge;
use crate::range::Range;
use crate::types::{Price, PriceTick, Timestamp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/** 9.1: main engine struct. all run state lives here */
#[derive(Debug)]
pub struct Engine {
    pub(super) config: SimulationConfig,
    pub(super) range: Range,
    pub(super) hedge: Hedge,
    pub(super) current_amounts: TokenAmounts,
    pub(super) totals: Accumulators,
    pub(super) collector: EventCollector,
    pub(super) current_time: Timestamp,
}

impl Engine {
    /// Validate the config and open the initial range on the first observation.
    /// The first observation is NOT consumed here. the caller feeds it through
    /// `step` along with the rest of the series.
    pub fn new(config: SimulationConfig, first: PriceTick) -> Result<Self, SimulationError> {
        config.validate()?;

        let range = Range::open(first.price, config.capital, config.range_width_pct, first.time)?;
        let current_amounts = range.start_amounts;

        Ok(Self {
            config,
            range,
            hedge: Hedge::NoHedge,
            current_amounts,
            totals: Accumulators::new(),
            collector: EventCollector::new(),
            current_time: first.time,
        })
    }

    // 9.2: process one observation. fixed order: mark the composition, map the
    // tick, try a hedge entry, check the stop, and only when the price has left
    // the range, rebalance. entry and stop run on the same observation, so a
    // hedge opened this tick is immediately stop-eligible.
    pub fn step(&mut self, tick: PriceTick) -> Result<(), SimulationError> {
        self.current_time = tick.time;
        let price = tick.price;

        self.current_amounts = self.range.composition_at(price);
        let position = self.range.tick_at(price);

        self.totals.ticks_processed += 1;

        if position.in_range {
            self.totals.ticks_in_range += 1;

            if !self.hedge.is_open() {
                self.totals.entry_checks += 1;

                if let Some(opened) =
                    self.hedge.try_enter(position.position, price, &self.config.hedge)
                {
                    self.totals.hedge_entries += 1;
                    self.emit(EventPayload::HedgeOpened(HedgeOpenedEvent {
                        side: opened.side,
                        entry_price: opened.entry,
                        tick: position.position,
                        stop_tick: opened.stop_tick,
                    }));
                }
            }

            if self.hedge.is_open() {
                self.totals.stop_checks += 1;

                if let Some(closed) =
                    self.hedge.check_stop(position.position, price, self.config.capital)
                {
                    self.totals.hedge_stop_closes += 1;
                    if closed.is_whipsaw() {
                        self.totals.whipsaw_count += 1;
                    }
                    self.totals.total_hedge_pnl = self.totals.total_hedge_pnl.add(closed.pnl);

                    self.emit(EventPayload::HedgeStopped(HedgeStoppedEvent {
                        side: closed.side,
                        entry_price: closed.entry,
                        exit_price: closed.exit,
                        tick: position.position,
                        pnl: closed.pnl,
                        whipsaw: closed.is_whipsaw(),
                    }));
                }
            }
        } else {
            self.totals.ticks_out_of_range += 1;
            self.rebalance(price)?;
        }

        Ok(())
    }

    // 9.3: the final report. settled totals plus the derived metrics.
    pub fn finish(&self) -> SimulationReport {
        let totals = &self.totals;

        let hedged_il = self
            .config
            .il_cap_policy
            .hedged_il(totals.total_il, totals.total_hedge_pnl);
        let net_pnl = totals.total_fees.sub(hedged_il);

        let il_reduction_pct = if totals.total_il.is_positive() {
            totals.total_il.sub(hedged_il).value() / totals.total_il.value() * dec!(100)
        } else {
            Decimal::ZERO
        };

        let decided = totals.successful_hedges + totals.whipsaw_count;
        let win_rate_pct = if decided > 0 {
            Decimal::from(totals.successful_hedges) / Decimal::from(decided) * dec!(100)
        } else {
            Decimal::ZERO
        };

        SimulationReport {
            config: self.config.clone(),
            ticks_processed: totals.ticks_processed,
            ticks_in_range: totals.ticks_in_range,
            ticks_out_of_range: totals.ticks_out_of_range,
            entry_checks: totals.entry_checks,
            stop_checks: totals.stop_checks,
            rebalance_count: totals.rebalance_count,
            hedge_entries: totals.hedge_entries,
            hedge_stop_closes: totals.hedge_stop_closes,
            hedge_forced_closes: totals.hedge_forced_closes,
            whipsaw_count: totals.whipsaw_count,
            successful_hedges: totals.successful_hedges,
            total_fees: totals.total_fees,
            unhedged_il: totals.total_il,
            total_hedge_pnl: totals.total_hedge_pnl,
            hedged_il,
            net_pnl,
            il_reduction_pct,
            win_rate_pct,
            event_count: self.collector.events().len(),
        }
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn range(&self) -> &Range {
        &self.range
    }

    pub fn hedge(&self) -> &Hedge {
        &self.hedge
    }

    /// LP composition marked at the last processed price.
    pub fn current_amounts(&self) -> TokenAmounts {
        self.current_amounts
    }

    pub fn totals(&self) -> &Accumulators {
        &self.totals
    }

    pub fn events(&self) -> &[Event] {
        self.collector.events()
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let events = self.collector.events();
        let start = events.len().saturating_sub(count);
        &events[start..]
    }

    pub(super) fn emit(&mut self, payload: EventPayload) {
        let event = Event::new(self.collector.next_id(), self.current_time, payload);
        self.collector.emit(event);
    }
}

// 9.4: series validation. the engine assumes a clean series, so reject the
// garbage up front: empty input and timestamps that go backwards.
pub fn validate_series(ticks: &[PriceTick]) -> Result<(), DataError> {
    if ticks.is_empty() {
        return Err(DataError::EmptySeries);
    }

    for (index, pair) in ticks.windows(2).enumerate() {
        if pair[1].time < pair[0].time {
            return Err(DataError::OutOfOrder { index: index + 1 });
        }
    }

    Ok(())
}

/// Build a tick series from raw (millis, price) pairs. rejects non-positive
/// prices with the offending index.
pub fn build_series(raw: &[(i64, Decimal)]) -> Result<Vec<PriceTick>, DataError> {
    raw.iter()
        .enumerate()
        .map(|(index, &(millis, price))| {
            let price = Price::new(price).ok_or(DataError::NonPositivePrice { index })?;
            Ok(PriceTick::new(Timestamp::from_millis(millis), price))
        })
        .collect()
}

// 9.5: one-shot runner. validates the series, opens the initial range on the
// first observation, then feeds every observation through the engine in order.
pub fn run_simulation(
    config: &SimulationConfig,
    ticks: &[PriceTick],
) -> Result<SimulationReport, SimulationError> {
    validate_series(ticks)?;

    let mut engine = Engine::new(config.clone(), ticks[0])?;
    for tick in ticks {
        engine.step(*tick)?;
    }

    Ok(engine.finish())
}
