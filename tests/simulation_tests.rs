//! End-to-end simulation scenario tests.
//!
//! These tests pin the engine's settlement accounting to hand-computed
//! expectations on small, fully traced price paths.

use clmm_hedge_core::*;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

const HOUR_MS: i64 = 3_600_000;

fn hourly_series(prices: &[Decimal]) -> Vec<PriceTick> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            PriceTick::new(
                Timestamp::from_millis(i as i64 * HOUR_MS),
                Price::new_unchecked(p),
            )
        })
        .collect()
}

/// $2000 into a 1% range at $100, two flat hours, then an exit at $101.5.
/// Everything about the single rebalance is recomputed by hand here.
#[test]
fn upper_exit_settles_hand_computed_il() {
    let config = SimulationConfig::baseline_unhedged();
    let ticks = hourly_series(&[dec!(100), dec!(100), dec!(101.5)]);

    let report = run_simulation(&config, &ticks).unwrap();

    assert_eq!(report.rebalance_count, 1);
    assert_eq!(report.ticks_in_range, 2);
    assert_eq!(report.ticks_out_of_range, 1);

    // liquidity solved from the quote leg: L = 1000 / (sqrt(100) - sqrt(99.5)).
    // above the range the position is pure quote: L * (sqrt(100.5) - sqrt(99.5)).
    let sqrt_entry = dec!(100).sqrt().unwrap();
    let sqrt_lower = dec!(99.5).sqrt().unwrap();
    let sqrt_upper = dec!(100.5).sqrt().unwrap();
    let liquidity = dec!(1000) / (sqrt_entry - sqrt_lower);
    let lp_exit_value = liquidity * (sqrt_upper - sqrt_lower);

    // the frozen split was 10 base + 1000 quote
    let hodl_exit_value = dec!(10) * dec!(101.5) + dec!(1000);
    let expected_il = hodl_exit_value - lp_exit_value;

    let il_error = (report.unhedged_il.value() - expected_il).abs();
    assert!(il_error < dec!(0.000001), "IL off by {}", il_error);
    assert!(report.unhedged_il.is_positive());

    // two hours of fee accrual at 60% APY on $2000
    let days = dec!(2) / dec!(24);
    let expected_fees = dec!(2000) * dec!(0.60) * (days / dec!(365.25));
    let fee_error = (report.total_fees.value() - expected_fees).abs();
    assert!(fee_error < dec!(0.000001), "fees off by {}", fee_error);
}

/// A short opened at tick 30 rides to tick 49 without touching its stop at 50,
/// then the price breaks out above the range and the close is forced at a loss.
#[test]
fn drift_without_stop_forces_close_at_loss() {
    let config = SimulationConfig::optimal_hedged();
    let ticks = hourly_series(&[dec!(100), dec!(99.8), dec!(99.99), dec!(100.6)]);

    let report = run_simulation(&config, &ticks).unwrap();

    assert_eq!(report.hedge_entries, 1);
    assert_eq!(report.hedge_stop_closes, 0);
    assert_eq!(report.hedge_forced_closes, 1);
    assert_eq!(report.rebalance_count, 1);

    // forced close at a loss is neither a whipsaw nor a success
    assert_eq!(report.whipsaw_count, 0);
    assert_eq!(report.successful_hedges, 0);
    assert_eq!(report.win_rate_pct, dec!(0));

    // short from 99.8 settled at 100.6
    let expected_pnl = (dec!(99.8) - dec!(100.6)) / dec!(99.8) * dec!(2000);
    let pnl_error = (report.total_hedge_pnl.value() - expected_pnl).abs();
    assert!(pnl_error < dec!(0.000000001), "pnl off by {}", pnl_error);
}

/// Same entry, but the bounce reaches the stop tick before any range exit.
#[test]
fn stop_fires_when_tick_crosses_buffer() {
    let config = SimulationConfig::optimal_hedged();
    // 100.01 maps to tick 51, past the stop at 50
    let ticks = hourly_series(&[dec!(100), dec!(99.8), dec!(100.01)]);

    let report = run_simulation(&config, &ticks).unwrap();

    assert_eq!(report.hedge_entries, 1);
    assert_eq!(report.hedge_stop_closes, 1);
    assert_eq!(report.whipsaw_count, 1);
    assert_eq!(report.hedge_forced_closes, 0);
    assert_eq!(report.rebalance_count, 0);
    assert!(report.total_hedge_pnl.is_negative());
}

/// The cap policy only rewrites hedged IL. raw IL, fees, and hedge pnl are
/// identical across policies, and the net difference is exactly the clamp.
#[test]
fn cap_policy_changes_only_hedged_il() {
    // short at tick 30, then a crash through the lower bound. the short earns
    // more than the narrow range loses.
    let ticks = hourly_series(&[dec!(100), dec!(99.8), dec!(99.0)]);

    let mut capped = SimulationConfig::optimal_hedged();
    capped.il_cap_policy = IlCapPolicy::CappedAtZero;
    let mut uncapped = capped.clone();
    uncapped.il_cap_policy = IlCapPolicy::Uncapped;

    let capped_report = run_simulation(&capped, &ticks).unwrap();
    let uncapped_report = run_simulation(&uncapped, &ticks).unwrap();

    assert_eq!(capped_report.unhedged_il, uncapped_report.unhedged_il);
    assert_eq!(capped_report.total_fees, uncapped_report.total_fees);
    assert_eq!(capped_report.total_hedge_pnl, uncapped_report.total_hedge_pnl);

    // hedge profit exceeds the IL on this path
    assert!(uncapped_report.total_hedge_pnl > uncapped_report.unhedged_il);
    assert!(uncapped_report.hedged_il.is_negative());
    assert_eq!(capped_report.hedged_il, Quote::zero());

    assert_eq!(
        uncapped_report.hedged_il,
        uncapped_report.unhedged_il.sub(uncapped_report.total_hedge_pnl)
    );
    assert_eq!(capped_report.il_reduction_pct, dec!(100));
}

/// Nothing settles while the price wanders inside the range.
#[test]
fn quiet_range_settles_nothing() {
    let config = SimulationConfig::baseline_unhedged();
    let ticks = hourly_series(&[
        dec!(100), dec!(100.2), dec!(99.9), dec!(100.3), dec!(99.8), dec!(100.1),
    ]);

    let report = run_simulation(&config, &ticks).unwrap();

    assert_eq!(report.rebalance_count, 0);
    assert_eq!(report.total_fees, Quote::zero());
    assert_eq!(report.unhedged_il, Quote::zero());
    assert_eq!(report.net_pnl, Quote::zero());
    assert_eq!(report.event_count, 0);
}

/// The event log and the report counters describe the same run.
#[test]
fn event_log_agrees_with_counters() {
    let config = SimulationConfig::optimal_hedged();
    let ticks = hourly_series(&[
        dec!(100),
        dec!(99.8),   // short entry at tick 30
        dec!(100.05), // tick 55, past the stop at 50: whipsaw
        dec!(100.7),  // range exit, rebalance, no hedge open
        dec!(100.45), // tick ~25 in the new range: short entry
        dec!(99.9),   // exit below, forced close in profit
        dec!(99.95),  // quiet tail
    ]);

    let mut engine = Engine::new(config, ticks[0]).unwrap();
    for tick in &ticks {
        engine.step(*tick).unwrap();
    }
    let report = engine.finish();

    let mut opened = 0u32;
    let mut stopped = 0u32;
    let mut forced = 0u32;
    let mut rebalanced = 0u32;
    let mut fees_from_events = Quote::zero();
    let mut il_from_events = Quote::zero();
    let mut pnl_from_events = Quote::zero();

    for event in engine.events() {
        match &event.payload {
            EventPayload::HedgeOpened(_) => opened += 1,
            EventPayload::HedgeStopped(stop) => {
                stopped += 1;
                pnl_from_events = pnl_from_events.add(stop.pnl);
            }
            EventPayload::HedgeForcedClosed(close) => {
                forced += 1;
                pnl_from_events = pnl_from_events.add(close.pnl);
            }
            EventPayload::RangeRebalanced(rebalance) => {
                rebalanced += 1;
                fees_from_events = fees_from_events.add(rebalance.fees_accrued);
                il_from_events = il_from_events.add(rebalance.impermanent_loss);
            }
        }
    }

    assert_eq!(opened, report.hedge_entries);
    assert_eq!(stopped, report.hedge_stop_closes);
    assert_eq!(forced, report.hedge_forced_closes);
    assert_eq!(rebalanced, report.rebalance_count);
    assert_eq!(fees_from_events, report.total_fees);
    assert_eq!(il_from_events, report.unhedged_il);
    assert_eq!(pnl_from_events, report.total_hedge_pnl);

    // this path was built to exercise every event type
    assert!(opened >= 2);
    assert_eq!(stopped, 1);
    assert_eq!(forced, 1);
    assert_eq!(rebalanced, 2);
}

/// Reports survive a serde round trip intact.
#[test]
fn report_serializes_round_trip() {
    let config = SimulationConfig::optimal_hedged();
    let ticks = hourly_series(&[dec!(100), dec!(99.8), dec!(100.05), dec!(100.7)]);

    let report = run_simulation(&config, &ticks).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let back: SimulationReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back, report);
}

/// A one-observation series is a complete, if boring, run.
#[test]
fn single_observation_run() {
    let config = SimulationConfig::optimal_hedged();
    let ticks = hourly_series(&[dec!(100)]);

    let report = run_simulation(&config, &ticks).unwrap();

    assert_eq!(report.ticks_processed, 1);
    assert_eq!(report.ticks_in_range, 1);
    assert_eq!(report.rebalance_count, 0);
    assert_eq!(report.event_count, 0);
    assert_eq!(report.net_pnl, Quote::zero());
}
