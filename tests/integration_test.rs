//! End-to-end pipeline tests: bars in, report out, no I/O.

mod common;

use approx::assert_relative_eq;
use common::*;
use macdvol::domain::backtest::{run_backtest, BacktestParams};
use macdvol::domain::error::MacdvolError;
use macdvol::domain::metrics::PerformanceReport;
use macdvol::domain::signal::{SignalEvent, SignalKind};
use macdvol::domain::simulator::simulate;
use macdvol::ports::data_port::DataPort;
use macdvol::ports::progress_port::NullProgress;

fn params_for(bars: &[DailyBar]) -> BacktestParams {
    BacktestParams::new(
        "600383",
        bars.first().map(|b| b.date).unwrap_or_else(base_date),
        bars.last()
            .map(|b| b.date)
            .unwrap_or_else(|| base_date() + chrono::Duration::days(1)),
    )
}

#[test]
fn golden_cross_with_volume_spike_trades_once() {
    // 40 flat bars at 100, 13 rising, 27 falling; volume spikes 5x on the
    // first up bar. The cross fires exactly there because DIF leaves zero
    // faster than DEA can follow.
    let bars = hump_series(40, 13, 27, 40);
    let params = params_for(&bars);
    let outcome = run_backtest(&bars, &params, &NullProgress).unwrap();

    assert!(!outcome.signals.is_empty());
    assert_eq!(outcome.signals[0].kind, SignalKind::Enter);
    assert_eq!(outcome.signals[0].bar_index, 40);

    assert_eq!(outcome.trades.len(), 1);
    let trade = &outcome.trades[0];
    assert_eq!(trade.entry_index, 40);
    assert_relative_eq!(trade.entry_price, 101.0);
    // death cross lands somewhere after the peak at bar 52
    assert!(trade.exit_index > 52);
    assert_relative_eq!(trade.exit_price, bars[trade.exit_index].close);

    assert_eq!(outcome.report.trade_count, 1);
    assert!(outcome.open_position_at_end.is_none());

    // floor(100_000 / 101) = 990 shares, 10 left in cash
    let entry_point = &outcome.equity_curve[40];
    assert_relative_eq!(entry_point.cash, 10.0);
    assert_relative_eq!(entry_point.holdings_value, 990.0 * 101.0);
}

#[test]
fn equity_stays_at_initial_cash_until_first_entry() {
    let bars = hump_series(40, 13, 27, 40);
    let params = params_for(&bars);
    let outcome = run_backtest(&bars, &params, &NullProgress).unwrap();

    for point in &outcome.equity_curve[..40] {
        assert_relative_eq!(point.total_equity, 100_000.0);
    }
    for point in &outcome.equity_curve {
        assert!(point.total_equity >= 0.0);
    }
}

#[test]
fn no_volume_spike_means_no_trades() {
    // Same shape, but the spike lands in the flat region where there is no
    // cross, so the golden cross itself fails the volume filter.
    let bars = hump_series(40, 13, 27, 10);
    let params = params_for(&bars);
    let outcome = run_backtest(&bars, &params, &NullProgress).unwrap();

    assert!(outcome.trades.is_empty());
    assert_eq!(outcome.report.trade_count, 0);
    assert_eq!(outcome.report.win_rate, None);
}

#[test]
fn constant_prices_produce_nothing() {
    let bars: Vec<DailyBar> = (0..60).map(|i| make_bar(i, 50.0, 1000.0)).collect();
    let params = params_for(&bars);
    let outcome = run_backtest(&bars, &params, &NullProgress).unwrap();

    // MACD converges to zero on a constant series
    let last = bars.len() - 1;
    assert_relative_eq!(outcome.frame.dif[last].unwrap(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(outcome.frame.dea[last].unwrap(), 0.0, epsilon = 1e-12);

    assert!(outcome.signals.is_empty());
    assert_relative_eq!(outcome.report.total_return, 0.0);
    assert_relative_eq!(outcome.report.max_drawdown, 0.0);
    assert_eq!(outcome.report.win_rate, None);
    assert_relative_eq!(outcome.report.final_equity, 100_000.0);
}

#[test]
fn declining_market_drawdown_matches_price_ratio() {
    // Hold from the first bar through a monotonic decline: drawdown is
    // 1 - final/peak and final equity is below starting cash.
    let closes: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
    let bars: Vec<DailyBar> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| make_bar(i as i64, c, 1000.0))
        .collect();

    let signals = [SignalEvent {
        bar_index: 0,
        kind: SignalKind::Enter,
    }];
    let result = simulate(&bars, &signals, 100_000.0, &NullProgress).unwrap();
    let elapsed = (bars[39].date - bars[0].date).num_days();
    let report = PerformanceReport::compute(&result.equity_curve, &result.trades, 100_000.0, elapsed);

    let final_price = closes[39];
    let peak_price = closes[0];
    assert_relative_eq!(report.max_drawdown, 1.0 - final_price / peak_price);
    assert!(report.final_equity < 100_000.0);
    assert!(report.annualized_return.unwrap() < 0.0);
}

#[test]
fn benchmark_tracks_buy_and_hold() {
    let bars = hump_series(40, 13, 27, 40);
    let params = params_for(&bars);
    let outcome = run_backtest(&bars, &params, &NullProgress).unwrap();

    assert_eq!(outcome.benchmark.len(), bars.len());
    assert_relative_eq!(outcome.benchmark[0], 100_000.0);
    for (i, bar) in bars.iter().enumerate() {
        assert_relative_eq!(
            outcome.benchmark[i],
            100_000.0 * bar.close / bars[0].close,
            epsilon = 1e-9
        );
    }
}

#[test]
fn pipeline_is_deterministic() {
    let bars = hump_series(40, 13, 27, 40);
    let params = params_for(&bars);

    let first = run_backtest(&bars, &params, &NullProgress).unwrap();
    let second = run_backtest(&bars, &params, &NullProgress).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.report.total_return.to_bits(),
        second.report.total_return.to_bits()
    );
    assert_eq!(
        first.report.max_drawdown.to_bits(),
        second.report.max_drawdown.to_bits()
    );
}

#[test]
fn short_history_is_rejected_before_simulation() {
    let bars: Vec<DailyBar> = (0..30).map(|i| make_bar(i, 50.0, 1000.0)).collect();
    let params = params_for(&bars);
    let err = run_backtest(&bars, &params, &NullProgress).unwrap_err();
    assert!(matches!(
        err,
        MacdvolError::InsufficientData {
            bars: 30,
            minimum: 35
        }
    ));
}

#[test]
fn empty_fetch_surfaces_as_no_data() {
    let port = MockDataPort::new().with_bars("600383", hump_series(40, 13, 27, 40));

    let bars = port
        .fetch_bars(
            "600383",
            base_date() - chrono::Duration::days(400),
            base_date() - chrono::Duration::days(300),
        )
        .unwrap();
    assert!(bars.is_empty());

    let params = BacktestParams::new(
        "600383",
        base_date() - chrono::Duration::days(400),
        base_date() - chrono::Duration::days(300),
    );
    let err = run_backtest(&bars, &params, &NullProgress).unwrap_err();
    assert!(matches!(err, MacdvolError::NoData { .. }));
}

#[test]
fn open_position_at_window_end_is_flagged_not_counted() {
    // Cut the series off right after the entry so the death cross never
    // arrives.
    let bars = &hump_series(40, 13, 27, 40)[..50];
    let params = params_for(bars);
    let outcome = run_backtest(bars, &params, &NullProgress).unwrap();

    assert_eq!(outcome.trades.len(), 0);
    assert_eq!(outcome.report.trade_count, 0);
    assert_eq!(outcome.report.win_rate, None);

    let open = outcome.open_position_at_end.as_ref().unwrap();
    assert_eq!(open.entry_index, 40);

    // still marked to market in the final equity point
    let last = outcome.equity_curve.last().unwrap();
    assert_relative_eq!(
        last.holdings_value,
        open.shares as f64 * bars[bars.len() - 1].close
    );
}
