// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// Seeding: the first `period` outputs are the running simple average of every
// close seen so far, so output index `period - 1` is the SMA of the first
// `period` closes and the recursion takes over from index `period`.  A series
// shorter than `period` therefore still yields one value per close.
// =============================================================================

/// Compute the EMA series for the given `closes` slice and look-back `period`.
///
/// The output always has the same length as `closes`.
///
/// # Edge cases
/// - empty `closes` => empty vec
/// - `period == 0` is treated as `period == 1` (the output equals the input)
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let multiplier = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(closes.len());
    let mut seed_sum = 0.0;
    let mut prev_ema = 0.0;

    for (i, &close) in closes.iter().enumerate() {
        let ema = if i < period {
            seed_sum += close;
            seed_sum / (i + 1) as f64
        } else {
            close * multiplier + prev_ema * (1.0 - multiplier)
        };
        result.push(ema);
        prev_ema = ema;
    }

    result
}

/// Most recent EMA value, `None` for an empty series.
pub fn latest_ema(closes: &[f64], period: usize) -> Option<f64> {
    calculate_ema(closes, period).last().copied()
}
