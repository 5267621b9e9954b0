// =============================================================================
// Stochastic RSI
// =============================================================================
//
// Applies the stochastic-oscillator transform to the rolling RSI sequence
// instead of to price:
//
//   raw_k = 100 * (rsi - min(rsi window)) / (max(rsi window) - min(rsi window))
//   %K    = SMA(raw_k, k_smooth)
//   %D    = SMA(%K, d_smooth)
//
// A flat RSI window (max == min) yields raw_k = 50.  Windows shrink to the
// available values at the start of the series.
//
// Classification is a plain comparison: %K above %D is bullish, below is
// bearish, equal is neutral.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::rsi::calculate_rsi_series;
use crate::indicators::sma::calculate_sma;
use crate::types::Direction;

/// Neutral oscillator reading.
const NEUTRAL_K: f64 = 50.0;

/// Look-back and smoothing lengths for [`calculate_stoch_rsi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochRsiParams {
    pub rsi_period: usize,
    pub stoch_period: usize,
    pub k_smooth: usize,
    pub d_smooth: usize,
}

impl Default for StochRsiParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            stoch_period: 14,
            k_smooth: 3,
            d_smooth: 3,
        }
    }
}

/// Latest Stochastic RSI reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochRsiResult {
    pub k: f64,
    pub d: f64,
    pub signal: Direction,
    pub overbought: bool,
    pub oversold: bool,
}

impl Default for StochRsiResult {
    fn default() -> Self {
        Self {
            k: NEUTRAL_K,
            d: NEUTRAL_K,
            signal: Direction::Neutral,
            overbought: false,
            oversold: false,
        }
    }
}

/// Overbought / oversold levels applied to %K and %D.
pub const OVERBOUGHT_LEVEL: f64 = 80.0;
pub const OVERSOLD_LEVEL: f64 = 20.0;

/// Compute the latest Stochastic RSI with the standard 80/20 levels.
pub fn calculate_stoch_rsi(closes: &[f64], params: StochRsiParams) -> StochRsiResult {
    calculate_stoch_rsi_with_levels(closes, params, OVERBOUGHT_LEVEL, OVERSOLD_LEVEL)
}

/// Compute the latest Stochastic RSI with explicit overbought/oversold levels.
///
/// An empty `closes` slice yields %K = %D = 50, neutral.
pub fn calculate_stoch_rsi_with_levels(
    closes: &[f64],
    params: StochRsiParams,
    overbought_level: f64,
    oversold_level: f64,
) -> StochRsiResult {
    let rsi = calculate_rsi_series(closes, params.rsi_period);
    let raw_k = stochastic_transform(&rsi, params.stoch_period);
    let k_line = calculate_sma(&raw_k, params.k_smooth);
    let d_line = calculate_sma(&k_line, params.d_smooth);

    let (Some(&k), Some(&d)) = (k_line.last(), d_line.last()) else {
        return StochRsiResult::default();
    };

    StochRsiResult {
        k,
        d,
        signal: classify_cross(k, d),
        overbought: k > overbought_level && d > overbought_level,
        oversold: k < oversold_level && d < oversold_level,
    }
}

/// Raw %K for every element of `values` over a trailing `period` window.
fn stochastic_transform(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    (0..values.len())
        .map(|i| {
            let window = &values[(i + 1).saturating_sub(period)..=i];
            let (lo, hi) = window
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            if hi > lo {
                100.0 * (values[i] - lo) / (hi - lo)
            } else {
                NEUTRAL_K
            }
        })
        .collect()
}

fn classify_cross(k: f64, d: f64) -> Direction {
    if k > d {
        Direction::Bullish
    } else if k < d {
        Direction::Bearish
    } else {
        Direction::Neutral
    }
}
