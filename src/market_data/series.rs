use tracing::debug;

use crate::error::ValidationError;
use crate::market_data::Candle;

/// Validate a candidate OHLCV series and hand it back unchanged.
///
/// Fails when the series is empty, when any sample breaks the per-candle
/// rules, or when timestamps are not strictly increasing.  Duplicate
/// timestamps are reported as a monotonicity violation; the engine never
/// deduplicates.
pub fn validate_series(candles: &[Candle]) -> Result<&[Candle], ValidationError> {
    if candles.is_empty() {
        debug!("rejecting empty series");
        return Err(ValidationError::Empty);
    }

    for (index, candle) in candles.iter().enumerate() {
        candle.check().map_err(|source| {
            debug!(index, error = %source, "rejecting malformed sample");
            ValidationError::InvalidSample { index, source }
        })?;
    }

    for (offset, pair) in candles.windows(2).enumerate() {
        let (previous, current) = (pair[0].timestamp(), pair[1].timestamp());
        if current <= previous {
            let index = offset + 1;
            debug!(index, previous, current, "rejecting non-monotonic timestamps");
            return Err(ValidationError::NonMonotonicTimestamp {
                index,
                previous,
                current,
            });
        }
    }

    Ok(candles)
}

/// Closing prices, oldest-first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(Candle::close).collect()
}
