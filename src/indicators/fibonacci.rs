// =============================================================================
// Fibonacci Extensions
// =============================================================================
//
// Given a first leg (swing1_start -> swing1_end) and the end of its
// retracement (swing2_end), project the leg's range beyond swing2_end in the
// direction of the first leg:
//
//   uptrend   (swing1_end > swing1_start): price = swing2_end + ratio * range
//   downtrend (otherwise):                 price = swing2_end - ratio * range
//
// Ratios 0.618 / 1.0 / 1.618 / 2.618.  Targets are ordered in the direction of
// travel: ascending for an uptrend, descending for a downtrend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Extension ratios and their labels.
const EXTENSION_RATIOS: [(f64, &str); 4] = [
    (0.618, "61.8%"),
    (1.0, "100%"),
    (1.618, "161.8%"),
    (2.618, "261.8%"),
];

/// How far beyond the retracement a projected level sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// ratio <= 1.0
    Target,
    /// 1.0 < ratio < 2.0
    StrongResistance,
    /// ratio >= 2.0
    ExtremeExtension,
}

impl Significance {
    fn for_ratio(ratio: f64) -> Self {
        if ratio <= 1.0 {
            Self::Target
        } else if ratio < 2.0 {
            Self::StrongResistance
        } else {
            Self::ExtremeExtension
        }
    }
}

/// Direction of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    UptrendContinuation,
    DowntrendContinuation,
    /// Part of the result vocabulary but never produced by the extension
    /// formula, which only projects continuations.
    Reversal,
}

/// One projected price level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibTarget {
    pub level: String,
    pub ratio: f64,
    pub price: f64,
    pub significance: Significance,
}

/// Fibonacci extension projection from three swing prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciExtension {
    /// Projected price keyed by percentage label ("61.8%", "100%", ...).
    pub levels: BTreeMap<String, f64>,
    pub targets: Vec<FibTarget>,
    pub projection: Projection,
}

/// Project extension targets beyond `swing2_end`.
pub fn calculate_fibonacci_extensions(
    swing1_start: f64,
    swing1_end: f64,
    swing2_end: f64,
) -> FibonacciExtension {
    let uptrend = swing1_end > swing1_start;
    let range = (swing1_end - swing1_start).abs();

    let mut targets: Vec<FibTarget> = EXTENSION_RATIOS
        .iter()
        .map(|&(ratio, label)| {
            let offset = ratio * range;
            FibTarget {
                level: label.to_string(),
                ratio,
                price: if uptrend {
                    swing2_end + offset
                } else {
                    swing2_end - offset
                },
                significance: Significance::for_ratio(ratio),
            }
        })
        .collect();

    if uptrend {
        targets.sort_by(|a, b| a.price.total_cmp(&b.price));
    } else {
        targets.sort_by(|a, b| b.price.total_cmp(&a.price));
    }

    let levels = targets
        .iter()
        .map(|t| (t.level.clone(), t.price))
        .collect();

    FibonacciExtension {
        levels,
        targets,
        projection: if uptrend {
            Projection::UptrendContinuation
        } else {
            Projection::DowntrendContinuation
        },
    }
}
