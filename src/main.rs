//! Concentrated-Liquidity Hedge Simulation.
//!
//! Demonstrates the full simulator lifecycle including range rebalancing,
//! hedge entries and stops, fee accrual, and the final profitability report.

use clmm_hedge_core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn main() {
    println!("Concentrated-Liquidity LP Hedging Simulation");
    println!("Single Pool, 1% Range Width, Tick-Driven Hedge Overlay\n");

    scenario_1_hedged_vs_unhedged();
    scenario_2_fee_models();
    scenario_3_cap_policy();
    scenario_4_threshold_sweep();
    scenario_5_whipsaw_chop();
    scenario_6_calm_market();
    scenario_7_audit_trail();

    println!("\nAll simulations completed successfully.");
}

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

/// Compound a starting price through per-step returns in basis points.
fn walk(start: Decimal, steps_bps: &[i64]) -> Vec<Decimal> {
    let mut prices = Vec::with_capacity(steps_bps.len() + 1);
    let mut price = start;
    prices.push(price);

    for &bp in steps_bps {
        price *= Decimal::ONE + Decimal::new(bp, 4);
        prices.push(price);
    }

    prices
}

/// A volatile day: repeated moves large enough to break a 1% range.
fn volatile_path() -> Vec<PriceTick> {
    let steps = [
        20, -35, 45, -60, 30, 55, -80, 25, 40, -30, -45, 70,
        -25, 35, -55, 20, 60, -40, 15, -65, 45, 30, -20, 50,
    ];
    hourly_series(&walk(dec!(100), &steps))
}

/// Hedged and unhedged strategies over the same volatile path.
fn scenario_1_hedged_vs_unhedged() {
    println!("Scenario 1: Hedged vs Unhedged\n");

    let ticks = volatile_path();

    let unhedged = run_simulation(&SimulationConfig::baseline_unhedged(), &ticks).unwrap();
    let hedged = run_simulation(&SimulationConfig::optimal_hedged(), &ticks).unwrap();

    println!("  {} observations, {} rebalances", unhedged.ticks_processed, unhedged.rebalance_count);
    println!();
    println!("  Unhedged: fees ${:.2}, IL ${:.2}, net ${:.2}",
        unhedged.total_fees.value(), unhedged.hedged_il.value(), unhedged.net_pnl.value());
    println!("  Hedged:   fees ${:.2}, IL ${:.2}, net ${:.2}",
        hedged.total_fees.value(), hedged.hedged_il.value(), hedged.net_pnl.value());
    println!();
    println!("  Hedge entries: {}, whipsaws: {}, successful: {}",
        hedged.hedge_entries, hedged.whipsaw_count, hedged.successful_hedges);
    println!("  IL reduction: {:.1}%, win rate: {:.1}%\n",
        hedged.il_reduction_pct, hedged.win_rate_pct);
}

/// Same path under the two fee models.
fn scenario_2_fee_models() {
    println!("Scenario 2: Fee Models\n");

    let ticks = volatile_path();

    let mut flat = SimulationConfig::optimal_hedged();
    flat.fee_model = FeeModel::FlatBaseline { monthly_fees: dec!(200) };

    let mut apy = SimulationConfig::optimal_hedged();
    apy.fee_model = FeeModel::AnnualApy { annual_rate: dec!(0.60) };

    let flat_report = run_simulation(&flat, &ticks).unwrap();
    let apy_report = run_simulation(&apy, &ticks).unwrap();

    println!("  Flat $200/month:  fees ${:.4}, net ${:.4}",
        flat_report.total_fees.value(), flat_report.net_pnl.value());
    println!("  60% APY on $2000: fees ${:.4}, net ${:.4}",
        apy_report.total_fees.value(), apy_report.net_pnl.value());
    println!("  Daily rate: flat ${:.4}, apy ${:.4}\n",
        flat.fee_model.daily_fees(flat.capital).value(),
        apy.fee_model.daily_fees(apy.capital).value());
}

/// Cap policy matters when the hedge out-earns the impermanent loss.
fn scenario_3_cap_policy() {
    println!("Scenario 3: IL Cap Policy\n");

    // short opens at tick 30, then the price collapses straight through the
    // lower bound. the short profit exceeds the IL of the narrow range.
    let ticks = hourly_series(&[dec!(100), dec!(99.8), dec!(99.0)]);

    let mut capped = SimulationConfig::optimal_hedged();
    capped.il_cap_policy = IlCapPolicy::CappedAtZero;

    let mut uncapped = SimulationConfig::optimal_hedged();
    uncapped.il_cap_policy = IlCapPolicy::Uncapped;

    let capped_report = run_simulation(&capped, &ticks).unwrap();
    let uncapped_report = run_simulation(&uncapped, &ticks).unwrap();

    println!("  Raw IL ${:.4}, hedge pnl ${:.4}",
        capped_report.unhedged_il.value(), capped_report.total_hedge_pnl.value());
    println!("  Capped:   hedged IL ${:.4}, net ${:.4}",
        capped_report.hedged_il.value(), capped_report.net_pnl.value());
    println!("  Uncapped: hedged IL ${:.4}, net ${:.4}\n",
        uncapped_report.hedged_il.value(), uncapped_report.net_pnl.value());
}

/// Mini parameter sweep over entry thresholds and stop buffers.
fn scenario_4_threshold_sweep() {
    println!("Scenario 4: Threshold Sweep\n");

    let ticks = volatile_path();
    let mut best: Option<(SimulationConfig, SimulationReport)> = None;

    for short in [dec!(30), dec!(35), dec!(40)] {
        for buffer in [dec!(10), dec!(15), dec!(20)] {
            let mut config = SimulationConfig::default();
            config.hedge = HedgeParams {
                short_threshold: short,
                long_threshold: dec!(100) - short,
                stop_buffer: buffer,
            };

            let report = run_simulation(&config, &ticks).unwrap();

            println!("  short {} long {} buffer {}: net ${:.2}, whipsaws {}, win rate {:.0}%",
                short, dec!(100) - short, buffer,
                report.net_pnl.value(), report.whipsaw_count, report.win_rate_pct);

            let better = match &best {
                Some((_, current)) => report.net_pnl > current.net_pnl,
                None => true,
            };
            if better {
                best = Some((config, report));
            }
        }
    }

    let (config, report) = best.unwrap();
    println!("\n  Best: short {} buffer {} with net ${:.2}\n",
        config.hedge.short_threshold, config.hedge.stop_buffer, report.net_pnl.value());
}

/// An oscillating market that stops hedges out repeatedly.
fn scenario_5_whipsaw_chop() {
    println!("Scenario 5: Whipsaw Chop\n");

    // +40bp, -40bp, over and over. stays inside the range but keeps crossing
    // the entry and stop thresholds.
    let steps = [40, -40, 40, -40, 40, -40, 40, -40, 40, -40, 40, -40];
    let ticks = hourly_series(&walk(dec!(100), &steps));

    let report = run_simulation(&SimulationConfig::optimal_hedged(), &ticks).unwrap();

    println!("  {} observations, all in range: {}", report.ticks_processed,
        report.ticks_out_of_range == 0);
    println!("  Hedge entries: {}, stop closes: {}, whipsaws: {}",
        report.hedge_entries, report.hedge_stop_closes, report.whipsaw_count);
    println!("  Hedge pnl: ${:.2}", report.total_hedge_pnl.value());
    println!("  Chop is where the hedge bleeds. win rate {:.0}%\n", report.win_rate_pct);
}

/// A calm market that never leaves the range.
fn scenario_6_calm_market() {
    println!("Scenario 6: Calm Market\n");

    let ticks = hourly_series(&[
        dec!(100), dec!(100.1), dec!(99.95), dec!(100.2),
        dec!(100.05), dec!(99.9), dec!(100.15),
    ]);

    let report = run_simulation(&SimulationConfig::optimal_hedged(), &ticks).unwrap();

    println!("  Rebalances: {}, IL: ${}", report.rebalance_count, report.unhedged_il.value());
    println!("  Settled fees: ${} (the range never closed, so nothing settled)",
        report.total_fees.value());
    println!("  Events: {}\n", report.event_count);
}

/// Walk the event log of a busy run.
fn scenario_7_audit_trail() {
    println!("Scenario 7: Audit Trail\n");

    let ticks = volatile_path();

    let mut engine = Engine::new(SimulationConfig::optimal_hedged(), ticks[0]).unwrap();
    for tick in &ticks {
        engine.step(*tick).unwrap();
    }

    println!("  {} events total, last 6:", engine.events().len());

    for event in engine.recent_events(6) {
        let description = match &event.payload {
            EventPayload::HedgeOpened(open) => format!(
                "hedge opened {:?} @ ${:.2}, tick {:.1}, stop {:.1}",
                open.side, open.entry_price.value(), open.tick, open.stop_tick
            ),
            EventPayload::HedgeStopped(stop) => format!(
                "hedge stopped {:?} @ ${:.2}, pnl ${:.2}, whipsaw: {}",
                stop.side, stop.exit_price.value(), stop.pnl.value(), stop.whipsaw
            ),
            EventPayload::HedgeForcedClosed(close) => format!(
                "hedge forced closed {:?} @ ${:.2}, pnl ${:.2}, successful: {}",
                close.side, close.exit_price.value(), close.pnl.value(), close.successful
            ),
            EventPayload::RangeRebalanced(rebalance) => format!(
                "rebalanced to [{:.2}, {:.2}], fees ${:.4}, IL ${:.4}",
                rebalance.new_lower.value(), rebalance.new_upper.value(),
                rebalance.fees_accrued.value(), rebalance.impermanent_loss.value()
            ),
        };

        println!("  [{}] t={}h {}", event.id.0, event.timestamp.as_millis() / HOUR_MS, description);
    }

    let report = engine.finish();
    println!("\n  Final: net ${:.2} over {} rebalances", report.net_pnl.value(), report.rebalance_count);
}
