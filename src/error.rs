// =============================================================================
// Engine errors
// =============================================================================
//
// The indicator engine has exactly one failure mode: malformed input.  Short
// series are never an error; every indicator degrades to a neutral default.

use thiserror::Error;

/// A single OHLCV sample violates one of the per-candle rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("{field} is not finite ({value})")]
    NonFinitePrice { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositivePrice { field: &'static str, value: f64 },

    #[error("volume must be finite and non-negative, got {0}")]
    InvalidVolume(f64),

    #[error("high {high} is below {field} {value}")]
    HighBelow {
        field: &'static str,
        high: f64,
        value: f64,
    },

    #[error("low {low} is above {field} {value}")]
    LowAbove {
        field: &'static str,
        low: f64,
        value: f64,
    },
}

/// Rejection of a candidate series by [`validate_series`](crate::market_data::validate_series).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("series is empty")]
    Empty,

    #[error("sample {index} is invalid: {source}")]
    InvalidSample {
        index: usize,
        #[source]
        source: SampleError,
    },

    #[error("timestamp at sample {index} ({current}) does not follow {previous}")]
    NonMonotonicTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },
}
