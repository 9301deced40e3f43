//! Weighted label tally used by the plurality-style strategies.

use std::collections::BTreeMap;
use supernova_utils::round3;

/// Relative difference below which two label weights count as equal.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Accumulated weight per decision label, in label order.
#[derive(Clone, Debug, Default)]
pub struct LabelTally {
    weights: BTreeMap<String, f64>,
    total: f64,
}

impl LabelTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `weight` for `label`. Negative or NaN weights count as zero.
    pub fn add(&mut self, label: &str, weight: f64) {
        let weight = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
        *self.weights.entry(label.to_string()).or_insert(0.0) += weight;
        self.total += weight;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weight(&self, label: &str) -> f64 {
        self.weights.get(label).copied().unwrap_or(0.0)
    }

    /// The label with the most weight.
    ///
    /// Weights within [`TIE_TOLERANCE`] of each other (relative to the total)
    /// are tied, and ties go to the lexicographically smallest label. The
    /// winner does not depend on the order weights were added in.
    pub fn winner(&self) -> Option<(&str, f64)> {
        let tolerance = TIE_TOLERANCE * self.total.max(1.0);
        let mut best: Option<(&str, f64)> = None;
        for (label, &weight) in &self.weights {
            match best {
                Some((_, top)) if weight <= top + tolerance => {}
                _ => best = Some((label.as_str(), weight)),
            }
        }
        best
    }

    /// Share of the total held by the winner, 0 when nothing was weighted.
    pub fn winner_share(&self) -> Option<(&str, f64)> {
        let (label, weight) = self.winner()?;
        let share = if self.total > 0.0 {
            (weight / self.total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some((label, share))
    }

    /// Per-label weights rounded for reporting.
    pub fn rounded(&self) -> BTreeMap<String, f64> {
        self.weights
            .iter()
            .map(|(label, weight)| (label.clone(), round3(*weight)))
            .collect()
    }
}
