// =============================================================================
// Volume Profile — Point of Control and Value Area
// =============================================================================
//
// The price range [min(low), max(high)] is split into `levels` equal-width
// buckets.  Each candle's full volume is credited to the bucket holding its
// close (volume is not spread across the candle's range).
//
//   POC        : midpoint of the bucket with the most volume (lowest price on
//                ties)
//   Value Area : contiguous buckets grown outward from the POC, one neighbour
//                at a time (the heavier side first, the lower side on ties),
//                until they hold at least `value_area_pct` of total volume
//
// A flat series (min == max) collapses to one bucket at that price.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::market_data::Candle;

/// Fraction of total volume enclosed by the value area.
pub const DEFAULT_VALUE_AREA_PCT: f64 = 0.68;

/// Upper bound on the bucket count; larger requests are clamped.
pub const MAX_PRICE_LEVELS: usize = 10_000;

/// One price bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Bucket midpoint.
    pub price: f64,
    pub volume: f64,
}

/// Volume histogram across price plus its derived reference levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    /// Buckets sorted ascending by price.
    pub levels: Vec<PriceLevel>,
    pub poc: f64,
    pub value_area_high: f64,
    pub value_area_low: f64,
    pub total_volume: f64,
}

/// Build the volume profile of `candles` with `levels` buckets.
///
/// An empty series yields an empty profile with every price at zero.
/// `levels == 0` is treated as a single bucket and `levels` above
/// [`MAX_PRICE_LEVELS`] is clamped to it.
pub fn calculate_volume_profile(
    candles: &[Candle],
    levels: usize,
    value_area_pct: f64,
) -> VolumeProfile {
    if candles.is_empty() {
        return VolumeProfile::default();
    }

    let (min_price, max_price) = candles
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.low()), hi.max(c.high()))
        });
    let total_volume: f64 = candles.iter().map(Candle::volume).sum();

    if max_price <= min_price {
        return VolumeProfile {
            levels: vec![PriceLevel {
                price: min_price,
                volume: total_volume,
            }],
            poc: min_price,
            value_area_high: min_price,
            value_area_low: min_price,
            total_volume,
        };
    }

    let bucket_count = levels.clamp(1, MAX_PRICE_LEVELS);
    let width = (max_price - min_price) / bucket_count as f64;

    let mut volumes = vec![0.0; bucket_count];
    for candle in candles {
        volumes[bucket_index(candle.close(), min_price, width, bucket_count)] += candle.volume();
    }

    let levels: Vec<PriceLevel> = volumes
        .iter()
        .enumerate()
        .map(|(i, &volume)| PriceLevel {
            price: min_price + (i as f64 + 0.5) * width,
            volume,
        })
        .collect();

    let poc_index = point_of_control(&volumes);
    let (low_index, high_index) = value_area(&volumes, poc_index, total_volume * value_area_pct);

    trace!(
        buckets = bucket_count,
        poc_index,
        low_index,
        high_index,
        "volume profile built"
    );

    VolumeProfile {
        poc: levels[poc_index].price,
        value_area_high: levels[high_index].price,
        value_area_low: levels[low_index].price,
        total_volume,
        levels,
    }
}

/// Bucket holding `price`; the range maximum belongs to the top bucket.
fn bucket_index(price: f64, min_price: f64, width: f64, bucket_count: usize) -> usize {
    let raw = ((price - min_price) / width).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(bucket_count - 1)
    }
}

/// Index of the heaviest bucket; the lowest index wins ties.
fn point_of_control(volumes: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in volumes.iter().enumerate().skip(1) {
        if v > volumes[best] {
            best = i;
        }
    }
    best
}

/// Grow `[low, high]` outward from `poc` until it holds `target` volume.
fn value_area(volumes: &[f64], poc: usize, target: f64) -> (usize, usize) {
    let (mut low, mut high) = (poc, poc);
    let mut enclosed = volumes[poc];

    while enclosed < target && (low > 0 || high + 1 < volumes.len()) {
        let below = (low > 0).then(|| volumes[low - 1]);
        let above = (high + 1 < volumes.len()).then(|| volumes[high + 1]);

        match (below, above) {
            (Some(b), Some(a)) if a > b => {
                high += 1;
                enclosed += a;
            }
            (Some(b), _) => {
                low -= 1;
                enclosed += b;
            }
            (None, Some(a)) => {
                high += 1;
                enclosed += a;
            }
            (None, None) => break,
        }
    }

    (low, high)
}
