// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   MACD line  = EMA(fast) - EMA(slow)          (element-wise, full length)
//   Signal     = EMA(MACD line, signal_period)  (latest value)
//   Histogram  = MACD line (latest) - Signal
//
// Because the EMA seeds from the running mean of available closes, a series
// shorter than `slow` still produces a value instead of failing.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::ema::calculate_ema;

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Compute the latest MACD, signal and histogram values.
///
/// An empty `closes` slice yields all zeros.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdResult {
    let macd_line = calculate_macd_line(closes, fast, slow);
    let Some(&macd) = macd_line.last() else {
        return MacdResult::default();
    };

    let signal = calculate_ema(&macd_line, signal_period)
        .last()
        .copied()
        .unwrap_or(macd);

    MacdResult {
        macd,
        signal,
        histogram: macd - signal,
    }
}

/// Full MACD line, one value per close.
pub fn calculate_macd_line(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_ema = calculate_ema(closes, fast);
    let slow_ema = calculate_ema(closes, slow);
    fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_empty_is_zero() {
        assert_eq!(calculate_macd(&[], 12, 26, 9), MacdResult::default());
    }

    #[test]
    fn macd_single_close_is_zero() {
        let r = calculate_macd(&[42.0], 12, 26, 9);
        assert_eq!(r.macd, 0.0);
        assert_eq!(r.histogram, 0.0);
    }

    #[test]
    fn macd_line_len_matches_input() {
        let closes: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        assert_eq!(calculate_macd_line(&closes, 12, 26).len(), 40);
    }

    #[test]
    fn macd_rising_series_is_positive() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let r = calculate_macd(&closes, 12, 26, 9);
        assert!(r.macd > 0.0);
        assert!((r.histogram - (r.macd - r.signal)).abs() < 1e-12);
    }

    #[test]
    fn macd_falling_series_is_negative() {
        let closes: Vec<f64> = (1..=100).rev().map(|x| x as f64).collect();
        let r = calculate_macd(&closes, 12, 26, 9);
        assert!(r.macd < 0.0);
    }

    #[test]
    fn macd_shorter_than_slow_period_still_produces_value() {
        let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        let r = calculate_macd(&closes, 12, 26, 9);
        // Both EMAs are still running means of the same five closes.
        assert!(r.macd.abs() < 1e-10);
        assert!(r.histogram.is_finite());
    }

    #[test]
    fn macd_matches_manual_composition() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let fast = calculate_ema(&closes, 12);
        let slow = calculate_ema(&closes, 26);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = *calculate_ema(&line, 9).last().unwrap();

        let r = calculate_macd(&closes, 12, 26, 9);
        assert_eq!(r.macd, *line.last().unwrap());
        assert_eq!(r.signal, signal);
        assert_eq!(r.histogram, r.macd - signal);
    }
}
