//! Cross-validation: how consistent consensus outcomes are across calls.
//!
//! The history is owned by the caller (typically backed by a persistence
//! store) and lent to the engine for one aggregation at a time. The engine
//! only ever appends. Sharing one history between concurrent aggregations
//! requires external synchronisation; distinct histories need none.

use serde::{Deserialize, Serialize};
use supernova_types::{ConsensusResult, CrossValidationReport, Decision, HistoryEntry};
use supernova_utils::round3;

/// Append-only log of past consensus outcomes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrossValidationHistory {
    entries: Vec<HistoryEntry>,
}

impl CrossValidationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from entries previously persisted by the caller.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append the outcome of `result` and report consistency.
    pub fn record_result(&mut self, result: &ConsensusResult) -> CrossValidationReport {
        self.record(HistoryEntry {
            consensus_decision: result.consensus_decision.clone(),
            consensus_confidence: result.consensus_confidence,
        })
    }

    /// Append `entry` and report consistency over the whole history.
    pub fn record(&mut self, entry: HistoryEntry) -> CrossValidationReport {
        self.entries.push(entry);
        // Non-empty after the push, so a top decision always exists.
        let (top_decision, top_count) = self
            .top_decision()
            .unwrap_or((Decision::NoDecision, 0));
        CrossValidationReport {
            history_size: self.entries.len(),
            top_decision,
            consistency_score: round3(top_count as f64 / self.entries.len() as f64),
        }
    }

    /// The most frequent decision and its count.
    ///
    /// Ties go to the decision that appeared first in the history.
    pub fn top_decision(&self) -> Option<(Decision, usize)> {
        // (decision, count), kept in first-seen order.
        let mut counts: Vec<(&Decision, usize)> = Vec::new();
        for entry in &self.entries {
            let decision = &entry.consensus_decision;
            match counts.iter_mut().find(|(d, _)| *d == decision) {
                Some((_, count)) => *count += 1,
                None => counts.push((decision, 1)),
            }
        }
        let mut best: Option<(&Decision, usize)> = None;
        for (decision, count) in counts {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((decision, count)),
            }
        }
        best.map(|(d, c)| (d.clone(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(decision: Decision) -> HistoryEntry {
        HistoryEntry {
            consensus_decision: decision,
            consensus_confidence: 0.9,
        }
    }

    #[test]
    fn first_record_is_fully_consistent() {
        let mut history = CrossValidationHistory::new();
        let report = history.record(entry(Decision::label("yes")));
        assert_eq!(report.history_size, 1);
        assert_eq!(report.top_decision, Decision::label("yes"));
        assert_eq!(report.consistency_score, 1.0);
    }

    #[test]
    fn consistency_is_share_of_top_decision() {
        let mut history = CrossValidationHistory::new();
        history.record(entry(Decision::label("yes")));
        history.record(entry(Decision::label("no")));
        let report = history.record(entry(Decision::label("yes")));
        assert_eq!(report.history_size, 3);
        assert_eq!(report.top_decision, Decision::label("yes"));
        assert_eq!(report.consistency_score, 0.667);
    }

    #[test]
    fn numeric_decisions_are_compared_by_value() {
        let mut history = CrossValidationHistory::new();
        history.record(entry(Decision::Score(0.9)));
        history.record(entry(Decision::Score(0.75)));
        let report = history.record(entry(Decision::Score(0.9)));
        assert_eq!(report.top_decision, Decision::Score(0.9));
    }

    #[test]
    fn ties_go_to_first_seen() {
        let mut history = CrossValidationHistory::new();
        history.record(entry(Decision::NoConsensus));
        let report = history.record(entry(Decision::label("yes")));
        assert_eq!(report.top_decision, Decision::NoConsensus);
        assert_eq!(report.consistency_score, 0.5);
    }

    #[test]
    fn history_persists_as_plain_list() {
        let history = CrossValidationHistory::from_entries(vec![entry(Decision::label("yes"))]);
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(
            json,
            r#"[{"consensus_decision":"yes","consensus_confidence":0.9}]"#
        );
        let back: CrossValidationHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
