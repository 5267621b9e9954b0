//! Cross-module behaviour of the indicator engine.

use aurora_signals::indicators::bollinger::calculate_bollinger;
use aurora_signals::indicators::ema::calculate_ema;
use aurora_signals::indicators::fibonacci::{calculate_fibonacci_extensions, Projection};
use aurora_signals::indicators::macd::calculate_macd;
use aurora_signals::indicators::rsi::calculate_rsi;
use aurora_signals::indicators::stoch_rsi::{calculate_stoch_rsi, StochRsiParams};
use aurora_signals::indicators::volume_profile::{
    calculate_volume_profile, DEFAULT_VALUE_AREA_PCT,
};
use aurora_signals::{analyze_indicators, validate_series, Candle, Direction, ValidationError};

fn wave(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 200.0 + (i as f64 * 0.21).sin() * 15.0 + (i as f64 * 0.05).cos() * 4.0;
            let open = close - (i as f64 * 0.8).sin();
            let high = open.max(close) + 0.75;
            let low = open.min(close) - 0.6;
            let volume = 1_000.0 + ((i * 31) % 17) as f64 * 40.0;
            Candle::new(1_700_000_000 + i as i64 * 3_600, open, high, low, close, volume).unwrap()
        })
        .collect()
}

fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(Candle::close).collect()
}

#[test]
fn rsi_stays_in_range_for_every_prefix() {
    let closes = closes(&wave(150));
    for end in 1..=closes.len() {
        let rsi = calculate_rsi(&closes[..end], 14);
        assert!((0.0..=100.0).contains(&rsi), "rsi {rsi} at prefix {end}");
    }
}

#[test]
fn rising_closes_give_rsi_above_50() {
    let closes: Vec<f64> = (0..15).map(|i| 10.0 + i as f64 * 0.5).collect();
    assert!(calculate_rsi(&closes, 14) > 50.0);
}

#[test]
fn ema_length_always_matches() {
    let closes = closes(&wave(64));
    for len in [0, 1, 5, 26, 64] {
        for period in [1, 9, 12, 26, 200] {
            assert_eq!(calculate_ema(&closes[..len], period).len(), len);
        }
    }
}

#[test]
fn constant_price_collapses_bollinger_bands() {
    let closes = vec![42.5; 25];
    let bb = calculate_bollinger(&closes, 20, 2.0);
    assert_eq!(bb.upper, 42.5);
    assert_eq!(bb.middle, 42.5);
    assert_eq!(bb.lower, 42.5);
    assert_eq!(bb.bandwidth, 0.0);
    assert_eq!(bb.percent_b, 0.5);
}

#[test]
fn volume_profile_conserves_volume_and_brackets_poc() {
    let candles = wave(120);
    let vp = calculate_volume_profile(&candles, 10, DEFAULT_VALUE_AREA_PCT);
    let expected: f64 = candles.iter().map(Candle::volume).sum();
    let binned: f64 = vp.levels.iter().map(|l| l.volume).sum();

    assert!((vp.total_volume - expected).abs() < 1e-6);
    assert!((binned - vp.total_volume).abs() < 1e-6);
    assert!(vp.value_area_low <= vp.poc && vp.poc <= vp.value_area_high);

    let enclosed: f64 = vp
        .levels
        .iter()
        .filter(|l| l.price >= vp.value_area_low && l.price <= vp.value_area_high)
        .map(|l| l.volume)
        .sum();
    assert!(enclosed + 1e-6 >= vp.total_volume * DEFAULT_VALUE_AREA_PCT);
}

#[test]
fn fibonacci_uptrend_targets_ascend_above_retracement() {
    let fib = calculate_fibonacci_extensions(100.0, 110.0, 105.0);
    assert_eq!(fib.projection, Projection::UptrendContinuation);
    assert!(fib.targets.iter().all(|t| t.price > 105.0));
    assert!(fib.targets.windows(2).all(|w| w[0].price < w[1].price));
    assert_eq!(fib.levels.len(), 4);
}

#[test]
fn fibonacci_downtrend_targets_descend_below_retracement() {
    let fib = calculate_fibonacci_extensions(110.0, 100.0, 105.0);
    assert_eq!(fib.projection, Projection::DowntrendContinuation);
    assert!(fib.targets.iter().all(|t| t.price < 105.0));
    assert!(fib.targets.windows(2).all(|w| w[0].price > w[1].price));
}

#[test]
fn repeated_calls_are_bit_identical() {
    let candles = wave(90);
    let closes = closes(&candles);

    assert_eq!(calculate_ema(&closes, 12), calculate_ema(&closes, 12));
    assert_eq!(calculate_rsi(&closes, 14).to_bits(), calculate_rsi(&closes, 14).to_bits());
    assert_eq!(calculate_macd(&closes, 12, 26, 9), calculate_macd(&closes, 12, 26, 9));
    assert_eq!(
        calculate_stoch_rsi(&closes, StochRsiParams::default()),
        calculate_stoch_rsi(&closes, StochRsiParams::default())
    );
    assert_eq!(
        calculate_volume_profile(&candles, 10, 0.68),
        calculate_volume_profile(&candles, 10, 0.68)
    );
    assert_eq!(analyze_indicators(&candles), analyze_indicators(&candles));
}

#[test]
fn empty_series_report_is_all_neutral() {
    let report = analyze_indicators(&[]);
    assert_eq!(report.rsi, 50.0);
    assert!(report.ema12.is_none());
    assert!(report.ema26.is_none());
    assert_eq!(report.signals.overall, Direction::Neutral);
    assert_eq!(report.bollinger.upper, 0.0);
    assert_eq!(report.stoch_rsi.k, 50.0);
    assert!(report.volume_profile.levels.is_empty());
}

#[test]
fn empty_series_report_serialises_nulls_for_missing_emas() {
    let json = serde_json::to_value(analyze_indicators(&[])).unwrap();
    assert!(json["ema12"].is_null());
    assert!(json["ema26"].is_null());
    assert_eq!(json["signals"]["overall"], "neutral");
    assert_eq!(json["volume_profile"]["levels"], serde_json::json!([]));
}

#[test]
fn report_roundtrips_through_json() {
    let report = analyze_indicators(&wave(60));
    let json = serde_json::to_string(&report).unwrap();
    let back: aurora_signals::IndicatorReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.signals, report.signals);
    assert_eq!(back.volume_profile.levels.len(), report.volume_profile.levels.len());
}

#[test]
fn validation_only_rejects_malformed_series() {
    let candles = wave(30);
    assert!(validate_series(&candles).is_ok());
    assert_eq!(validate_series(&[]), Err(ValidationError::Empty));

    let mut reordered = candles.clone();
    reordered.swap(10, 11);
    assert!(matches!(
        validate_series(&reordered),
        Err(ValidationError::NonMonotonicTimestamp { index: 11, .. })
    ));
}

#[test]
fn candles_can_be_analyzed_concurrently() {
    let candles = wave(80);
    let expected = analyze_indicators(&candles);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| analyze_indicators(&candles))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
