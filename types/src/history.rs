//! Records exchanged with the cross-validation tracker.

use crate::decision::Decision;
use serde::{Deserialize, Serialize};

/// One past consensus outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub consensus_decision: Decision,
    pub consensus_confidence: f64,
}

/// How consistent recent outcomes have been.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    /// Entries in the history, including the one just recorded.
    pub history_size: usize,
    /// Most frequent historical decision.
    pub top_decision: Decision,
    /// Share of the history agreeing with `top_decision`.
    pub consistency_score: f64,
}
