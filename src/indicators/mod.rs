// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the signal
// engine.  None of them fail on short input: each degrades to a documented
// neutral value so that a brand-new asset with little history still gets a
// usable reading.

pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stoch_rsi;
pub mod volume_profile;

pub use bollinger::{calculate_bollinger, BollingerResult};
pub use ema::calculate_ema;
pub use fibonacci::{calculate_fibonacci_extensions, FibonacciExtension};
pub use macd::{calculate_macd, MacdResult};
pub use rsi::{calculate_rsi, calculate_rsi_series};
pub use stoch_rsi::{calculate_stoch_rsi, StochRsiParams, StochRsiResult};
pub use volume_profile::{calculate_volume_profile, VolumeProfile};
