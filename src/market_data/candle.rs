use serde::{Deserialize, Serialize};

use crate::error::SampleError;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV sample.
///
/// Fields are private so that every `Candle` in the program has passed the
/// per-sample checks in [`Candle::new`]: prices are finite and positive,
/// volume is finite and non-negative, and `low <= open, close <= high`.
/// Deserialisation routes through the same constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandle", into = "RawCandle")]
pub struct Candle {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Wire shape of a candle before validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCandle {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl Candle {
    /// Build a candle, rejecting malformed prices or volume.
    pub fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Result<Self, SampleError> {
        let candle = Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        };
        candle.check()?;
        Ok(candle)
    }

    /// Re-run the per-sample rules.
    pub(crate) fn check(&self) -> Result<(), SampleError> {
        for (field, value) in self.prices() {
            if !value.is_finite() {
                return Err(SampleError::NonFinitePrice { field, value });
            }
            if value <= 0.0 {
                return Err(SampleError::NonPositivePrice { field, value });
            }
        }

        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(SampleError::InvalidVolume(self.volume));
        }

        for (field, value) in [("open", self.open), ("close", self.close), ("low", self.low)] {
            if self.high < value {
                return Err(SampleError::HighBelow {
                    field,
                    high: self.high,
                    value,
                });
            }
        }
        for (field, value) in [("open", self.open), ("close", self.close)] {
            if self.low > value {
                return Err(SampleError::LowAbove {
                    field,
                    low: self.low,
                    value,
                });
            }
        }

        Ok(())
    }

    fn prices(&self) -> [(&'static str, f64); 4] {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl TryFrom<RawCandle> for Candle {
    type Error = SampleError;

    fn try_from(raw: RawCandle) -> Result<Self, Self::Error> {
        Self::new(raw.timestamp, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

impl From<Candle> for RawCandle {
    fn from(c: Candle) -> Self {
        Self {
            timestamp: c.timestamp,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
            volume: c.volume,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
