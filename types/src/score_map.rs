//! Per-validator scalar lookups (reputation, temporal trust).

use crate::validator::ValidatorId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of a per-validator score in `[0, 1]` supplied by an external
/// tracker. Missing entries resolve to a caller-chosen fallback.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
    scores: HashMap<ValidatorId, f64>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace a validator's score.
    pub fn insert(&mut self, id: impl Into<ValidatorId>, score: f64) {
        self.scores.insert(id.into(), score);
    }

    /// Score for `id`, or `fallback` when the validator is unknown.
    ///
    /// Negative and NaN values resolve to 0 so downstream weights stay non-negative.
    pub fn lookup(&self, id: &ValidatorId, fallback: f64) -> f64 {
        let raw = self.scores.get(id).copied().unwrap_or(fallback);
        if raw.is_nan() {
            0.0
        } else {
            raw.max(0.0)
        }
    }

    /// Add `amount` to the entry for `id`, starting from `base` when absent.
    pub fn add(&mut self, id: &ValidatorId, amount: f64, base: f64) {
        let entry = self.scores.entry(id.clone()).or_insert(base);
        *entry += amount;
    }

    pub fn get(&self, id: &ValidatorId) -> Option<f64> {
        self.scores.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ValidatorId, f64)> {
        self.scores.iter().map(|(id, score)| (id, *score))
    }
}

impl<I: Into<ValidatorId>> FromIterator<(I, f64)> for ScoreMap {
    fn from_iter<T: IntoIterator<Item = (I, f64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().map(|(id, s)| (id.into(), s)).collect(),
        }
    }
}
