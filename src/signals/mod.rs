// =============================================================================
// Signals Module
// =============================================================================
//
// Turns indicator readings into qualitative tags and one overall call.

pub mod aggregator;

pub use aggregator::{aggregate_signals, SignalBundle};
