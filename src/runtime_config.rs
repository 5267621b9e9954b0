// =============================================================================
// Engine Configuration — indicator periods and classification thresholds
// =============================================================================
//
// Every tunable parameter of the signal engine lives here.  The config is
// passed explicitly to `analysis::analyze_with_config`; the engine never reads
// it from a global.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::stoch_rsi::StochRsiParams;
use crate::indicators::volume_profile::DEFAULT_VALUE_AREA_PCT;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_ema_fast_period() -> usize {
    12
}

fn default_ema_slow_period() -> usize {
    26
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_macd_signal_period() -> usize {
    9
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_std() -> f64 {
    2.0
}

fn default_squeeze_bandwidth() -> f64 {
    0.015
}

fn default_expansion_bandwidth() -> f64 {
    0.05
}

fn default_stoch_overbought() -> f64 {
    80.0
}

fn default_stoch_oversold() -> f64 {
    20.0
}

fn default_volume_levels() -> usize {
    10
}

fn default_value_area_pct() -> f64 {
    DEFAULT_VALUE_AREA_PCT
}

// =============================================================================
// SignalThresholds
// =============================================================================

/// Cut-offs used to turn indicator values into qualitative tags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalThresholds {
    /// RSI strictly above this is overbought.
    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// RSI strictly below this is oversold.
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    /// Bollinger bandwidth (fraction of the middle band) below which the
    /// bands are in a squeeze.
    #[serde(default = "default_squeeze_bandwidth")]
    pub squeeze_bandwidth: f64,

    /// Bollinger bandwidth above which the bands are expanding.
    #[serde(default = "default_expansion_bandwidth")]
    pub expansion_bandwidth: f64,

    /// %K and %D both above this flag Stochastic RSI overbought.
    #[serde(default = "default_stoch_overbought")]
    pub stoch_overbought: f64,

    /// %K and %D both below this flag Stochastic RSI oversold.
    #[serde(default = "default_stoch_oversold")]
    pub stoch_oversold: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            squeeze_bandwidth: default_squeeze_bandwidth(),
            expansion_bandwidth: default_expansion_bandwidth(),
            stoch_overbought: default_stoch_overbought(),
            stoch_oversold: default_stoch_oversold(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for one analysis run.
///
/// Every field has a serde default so that older JSON files missing new fields
/// will still deserialise correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Moving averages ----------------------------------------------------

    /// Fast EMA period, also the MACD fast leg.
    #[serde(default = "default_ema_fast_period")]
    pub ema_fast_period: usize,

    /// Slow EMA period, also the MACD slow leg.
    #[serde(default = "default_ema_slow_period")]
    pub ema_slow_period: usize,

    /// EMA period applied to the MACD line.
    #[serde(default = "default_macd_signal_period")]
    pub macd_signal_period: usize,

    // --- Oscillators --------------------------------------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default)]
    pub stoch_rsi: StochRsiParams,

    // --- Bands & profile ----------------------------------------------------

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Band half-width in standard deviations.
    #[serde(default = "default_bollinger_std")]
    pub bollinger_std: f64,

    /// Number of price buckets in the volume profile.
    #[serde(default = "default_volume_levels")]
    pub volume_levels: usize,

    /// Fraction of total volume the value area must enclose.
    #[serde(default = "default_value_area_pct")]
    pub value_area_pct: f64,

    // --- Classification -----------------------------------------------------

    #[serde(default)]
    pub thresholds: SignalThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ema_fast_period: default_ema_fast_period(),
            ema_slow_period: default_ema_slow_period(),
            macd_signal_period: default_macd_signal_period(),
            rsi_period: default_rsi_period(),
            stoch_rsi: StochRsiParams::default(),
            bollinger_period: default_bollinger_period(),
            bollinger_std: default_bollinger_std(),
            volume_levels: default_volume_levels(),
            value_area_pct: default_value_area_pct(),
            thresholds: SignalThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            rsi_period = config.rsi_period,
            bollinger_period = config.bollinger_period,
            volume_levels = config.volume_levels,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
