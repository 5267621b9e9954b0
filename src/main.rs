// =============================================================================
// Aurora Signals — report driver
// =============================================================================
//
// Usage: aurora-signals <series.json> [engine_config.json]
//
// Reads a JSON array of candles, validates it, runs the indicator engine and
// prints the resulting report as pretty JSON on stdout.  The config path may
// also come from AURORA_ENGINE_CONFIG; a missing or unreadable config falls
// back to defaults with a warning.
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aurora_signals::{analyze_with_config, validate_series, Candle, EngineConfig};

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // ── 2. Arguments & config ────────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let series_path: PathBuf = args
        .next()
        .context("usage: aurora-signals <series.json> [engine_config.json]")?
        .into();

    let config_path = args
        .next()
        .or_else(|| std::env::var("AURORA_ENGINE_CONFIG").ok());

    let config = match config_path {
        Some(path) => EngineConfig::load(&path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load engine config, using defaults");
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    // ── 3. Load & validate the series ────────────────────────────────────
    let content = std::fs::read_to_string(&series_path)
        .with_context(|| format!("failed to read series from {}", series_path.display()))?;
    let candles: Vec<Candle> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse series from {}", series_path.display()))?;
    let candles = validate_series(&candles)
        .with_context(|| format!("series in {} is malformed", series_path.display()))?;

    info!(path = %series_path.display(), candles = candles.len(), "series loaded");

    // ── 4. Analyze & report ──────────────────────────────────────────────
    let report = analyze_with_config(candles, &config);
    info!(
        rsi = format!("{:.2}", report.rsi),
        overall = %report.signals.overall,
        "analysis complete"
    );

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");
    Ok(())
}
