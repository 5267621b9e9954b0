// =============================================================================
// Indicator Analysis — one report per series
// =============================================================================
//
// Runs every series-driven indicator over a validated candle slice and
// classifies the results:
//
//   closes ─┬─ EMA(fast), EMA(slow), MACD
//           ├─ RSI, Stochastic RSI
//           └─ Bollinger Bands
//   candles ── Volume Profile
//
// An empty slice is accepted and yields the neutral defaults (RSI 50, no
// EMAs, zero bands, %K 50, empty profile, overall neutral).  Fibonacci
// extensions are not part of the report: they need externally chosen swings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::indicators::bollinger::{calculate_bollinger, BollingerResult};
use crate::indicators::ema::latest_ema;
use crate::indicators::macd::{calculate_macd, MacdResult};
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::stoch_rsi::{calculate_stoch_rsi_with_levels, StochRsiResult};
use crate::indicators::volume_profile::{calculate_volume_profile, VolumeProfile};
use crate::market_data::{closes, validate_series, Candle};
use crate::runtime_config::EngineConfig;
use crate::signals::aggregator::{aggregate_signals, SignalBundle};

/// Full indicator snapshot for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    pub candles: usize,
    pub last_close: Option<f64>,
    pub rsi: f64,
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
    pub macd: MacdResult,
    pub bollinger: BollingerResult,
    pub stoch_rsi: StochRsiResult,
    pub volume_profile: VolumeProfile,
    pub signals: SignalBundle,
}

/// Analyze `candles` with the default configuration.
pub fn analyze_indicators(candles: &[Candle]) -> IndicatorReport {
    analyze_with_config(candles, &EngineConfig::default())
}

/// Validate `candles`, then analyze them with the default configuration.
pub fn analyze_series(candles: &[Candle]) -> Result<IndicatorReport, ValidationError> {
    validate_series(candles).map(analyze_indicators)
}

/// Analyze `candles` with an explicit configuration.
///
/// `ema12` / `ema26` carry the configured fast / slow EMA periods.
pub fn analyze_with_config(candles: &[Candle], config: &EngineConfig) -> IndicatorReport {
    let closes = closes(candles);
    let thresholds = &config.thresholds;

    let rsi = calculate_rsi(&closes, config.rsi_period);
    let ema12 = latest_ema(&closes, config.ema_fast_period);
    let ema26 = latest_ema(&closes, config.ema_slow_period);
    let macd = calculate_macd(
        &closes,
        config.ema_fast_period,
        config.ema_slow_period,
        config.macd_signal_period,
    );
    let bollinger = calculate_bollinger(&closes, config.bollinger_period, config.bollinger_std);
    let stoch_rsi = calculate_stoch_rsi_with_levels(
        &closes,
        config.stoch_rsi,
        thresholds.stoch_overbought,
        thresholds.stoch_oversold,
    );
    let volume_profile =
        calculate_volume_profile(candles, config.volume_levels, config.value_area_pct);

    let signals = aggregate_signals(
        rsi,
        macd.histogram,
        bollinger.bandwidth,
        stoch_rsi.signal,
        thresholds,
    );

    debug!(
        candles = candles.len(),
        rsi = format!("{:.2}", rsi),
        macd_histogram = format!("{:.4}", macd.histogram),
        bandwidth = format!("{:.4}", bollinger.bandwidth),
        stoch_k = format!("{:.2}", stoch_rsi.k),
        poc = volume_profile.poc,
        overall = %signals.overall,
        "indicator analysis complete"
    );

    IndicatorReport {
        candles: candles.len(),
        last_close: closes.last().copied(),
        rsi,
        ema12,
        ema26,
        macd,
        bollinger,
        stoch_rsi,
        volume_profile,
        signals,
    }
}
