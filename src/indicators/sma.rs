// =============================================================================
// Simple Moving Average (SMA) — trailing mean with a shrinking warm-up window
// =============================================================================

/// Trailing simple moving average.
///
/// Element `i` is the mean of `data[i + 1 - period ..= i]`; while fewer than
/// `period` values exist the window shrinks to the available prefix, so the
/// output has the same length as the input.  `period == 0` is treated as 1.
pub fn calculate_sma(data: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    (0..data.len())
        .map(|i| {
            let window = &data[(i + 1).saturating_sub(period)..=i];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}
