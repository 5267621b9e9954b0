// =============================================================================
// Aurora Signals — Indicator & Signal Engine
// =============================================================================
//
// Derives technical indicators and a consolidated directional signal from a
// chronological OHLCV series for a single asset.  Every computation is a pure
// function of its arguments: no caches, no globals, no I/O.  Calls can be
// made concurrently from any number of threads.
//
// Only malformed input is an error (`ValidationError`); short input degrades
// to documented neutral values.
// =============================================================================

pub mod analysis;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod narration_cache;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use analysis::{analyze_indicators, analyze_series, analyze_with_config, IndicatorReport};
pub use error::{SampleError, ValidationError};
pub use market_data::{validate_series, Candle};
pub use runtime_config::EngineConfig;
pub use signals::SignalBundle;
pub use types::{BollingerSignal, Direction, MacdSignal, RsiSignal};
