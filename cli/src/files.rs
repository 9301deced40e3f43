//! JSON inputs and the persisted history file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use supernova_consensus::CrossValidationHistory;
use supernova_types::{ScoreMap, Vote};

/// Trust signals for the validator pool, as supplied by external trackers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSignals {
    pub reputations: ScoreMap,
    pub temporal_trust: ScoreMap,
    pub diversity_score: Option<f64>,
}

pub fn load_votes(path: &Path) -> anyhow::Result<Vec<Vote>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read votes from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse votes in {}", path.display()))
}

/// Signals are optional; no path means no signals.
pub fn load_signals(path: Option<&Path>) -> anyhow::Result<PoolSignals> {
    let Some(path) = path else {
        return Ok(PoolSignals::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read signals from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse signals in {}", path.display()))
}

/// A missing history file starts an empty history.
pub fn load_history(path: &Path) -> anyhow::Result<CrossValidationHistory> {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse history in {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("no history at {}, starting fresh", path.display());
            Ok(CrossValidationHistory::new())
        }
        Err(e) => Err(e).with_context(|| format!("failed to read history from {}", path.display())),
    }
}

pub fn save_history(path: &Path, history: &CrossValidationHistory) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write history to {}", path.display()))?;
    tracing::debug!(entries = history.len(), "history saved to {}", path.display());
    Ok(())
}
