// =============================================================================
// Shared qualitative tags produced by the signal engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Directional call: Stochastic-RSI crossover and the overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bullish,
    Bearish,
    Neutral,
}

impl Default for Direction {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// RSI zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiSignal {
    /// Contrarian vote used by the overall call: oversold leans bullish,
    /// overbought leans bearish, neutral abstains.
    pub fn vote(self) -> Direction {
        match self {
            Self::Oversold => Direction::Bullish,
            Self::Overbought => Direction::Bearish,
            Self::Neutral => Direction::Neutral,
        }
    }
}

impl std::fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "overbought"),
            Self::Oversold => write!(f, "oversold"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// MACD histogram polarity.  A histogram of exactly zero counts as bearish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdSignal {
    Bullish,
    Bearish,
}

impl MacdSignal {
    pub fn vote(self) -> Direction {
        match self {
            Self::Bullish => Direction::Bullish,
            Self::Bearish => Direction::Bearish,
        }
    }
}

impl std::fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
        }
    }
}

/// Bollinger bandwidth regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerSignal {
    Squeeze,
    Normal,
    Expansion,
}

impl std::fmt::Display for BollingerSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squeeze => write!(f, "squeeze"),
            Self::Normal => write!(f, "normal"),
            Self::Expansion => write!(f, "expansion"),
        }
    }
}
