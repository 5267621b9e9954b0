// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the same trailing window.  Two normalised metrics are derived:
//
//   bandwidth = (upper - lower) / middle
//   %B        = (last_close - lower) / (upper - lower)
//
// A window shorter than `period` simply uses every available close.  A flat
// window (upper == lower) reports %B = 0.5.

use serde::{Deserialize, Serialize};

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub bandwidth: f64,
    pub percent_b: f64,
}

impl Default for BollingerResult {
    /// Bands for an empty series: all zero, %B centred.
    fn default() -> Self {
        Self {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
            bandwidth: 0.0,
            percent_b: 0.5,
        }
    }
}

/// Calculate Bollinger Bands over the trailing `period` closes.
///
/// - `upper`     = SMA + `num_std` * σ
/// - `middle`    = SMA
/// - `lower`     = SMA - `num_std` * σ
/// - `bandwidth` = (upper - lower) / middle, 0 when the middle band is 0
/// - `percent_b` = position of the last close inside the band
///
/// Returns [`BollingerResult::default`] for an empty slice.
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerResult {
    let Some(&last_close) = closes.last() else {
        return BollingerResult::default();
    };

    let period = period.clamp(1, closes.len());
    let window = &closes[closes.len() - period..];
    let n = window.len() as f64;

    let middle = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let upper = middle + num_std * std_dev;
    let lower = middle - num_std * std_dev;

    let bandwidth = if middle != 0.0 {
        (upper - lower) / middle
    } else {
        0.0
    };

    let band = upper - lower;
    let percent_b = if band > 0.0 {
        (last_close - lower) / band
    } else {
        0.5
    };

    BollingerResult {
        upper,
        middle,
        lower,
        bandwidth,
        percent_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!((bb.middle - 10.5).abs() < 1e-10);
        assert!(bb.bandwidth > 0.0);
        // Last close sits above the mean.
        assert!(bb.percent_b > 0.5);
    }

    #[test]
    fn bollinger_known_values() {
        let closes = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // mean 5, population σ 2
        let bb = calculate_bollinger(&closes, 8, 2.0);
        assert!((bb.middle - 5.0).abs() < 1e-10);
        assert!((bb.upper - 9.0).abs() < 1e-10);
        assert!((bb.lower - 1.0).abs() < 1e-10);
        assert!((bb.bandwidth - 1.6).abs() < 1e-10);
        assert!((bb.percent_b - 1.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_uses_trailing_window_only() {
        let mut closes = vec![1000.0; 10];
        closes.extend(std::iter::repeat(50.0).take(20));
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!((bb.middle - 50.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_insufficient_data_uses_available() {
        let closes = vec![1.0, 2.0, 3.0];
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert!((bb.middle - 2.0).abs() < 1e-10);
        assert!(bb.upper > bb.lower);
    }

    #[test]
    fn bollinger_flat() {
        let closes = vec![100.0; 20];
        let bb = calculate_bollinger(&closes, 20, 2.0);
        assert_eq!(bb.upper, 100.0);
        assert_eq!(bb.middle, 100.0);
        assert_eq!(bb.lower, 100.0);
        assert_eq!(bb.bandwidth, 0.0);
        assert_eq!(bb.percent_b, 0.5);
    }

    #[test]
    fn bollinger_empty() {
        let bb = calculate_bollinger(&[], 20, 2.0);
        assert_eq!(bb, BollingerResult::default());
        assert_eq!(bb.upper, 0.0);
    }
}
