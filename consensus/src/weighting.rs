//! Per-vote weights shared by every strategy.

use chrono::{DateTime, Utc};
use supernova_types::{ScoreMap, ValidatorId, Vote};

use crate::config::ConsensusConfig;
use crate::decay::decay_factor;

/// Share of the blended weight taken from reputation; the rest is temporal trust.
pub const REPUTATION_BLEND: f64 = 0.7;

/// Turns a vote plus external trust signals into a non-negative scalar weight.
///
/// Borrowed for the duration of one aggregation; holds no state of its own.
pub struct WeightingModel<'a> {
    config: &'a ConsensusConfig,
    reputations: &'a ScoreMap,
    temporal_trust: &'a ScoreMap,
    now: DateTime<Utc>,
}

impl<'a> WeightingModel<'a> {
    pub fn new(
        config: &'a ConsensusConfig,
        reputations: &'a ScoreMap,
        temporal_trust: &'a ScoreMap,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            reputations,
            temporal_trust,
            now,
        }
    }

    pub fn config(&self) -> &ConsensusConfig {
        self.config
    }

    /// Effective reputation of `id`, including any delegated weight.
    pub fn reputation(&self, id: &ValidatorId) -> f64 {
        self.reputations.lookup(id, self.config.default_reputation)
    }

    pub fn temporal_trust(&self, id: &ValidatorId) -> f64 {
        self.temporal_trust.lookup(id, self.config.default_temporal_trust)
    }

    /// Decay multiplier for the vote's age.
    pub fn decay(&self, vote: &Vote) -> f64 {
        decay_factor(
            vote.timestamp.as_deref(),
            self.now,
            self.config.vote_decay_half_life_days,
        )
    }

    fn reputation_of(&self, vote: &Vote) -> f64 {
        vote.voter().map_or(0.0, |id| self.reputation(id))
    }

    /// `min(reputation * cap, cap)`: reputation scaled up, never beyond the cap.
    pub fn capped_reputation(&self, reputation: f64) -> f64 {
        let cap = self.config.max_reputation_weight;
        (reputation * cap).min(cap)
    }

    /// Capped reputation times decay (weighted-average and majority family).
    pub fn capped_weight(&self, vote: &Vote) -> f64 {
        self.capped_reputation(self.reputation_of(vote)) * self.decay(vote)
    }

    /// Raw reputation times decay (ranked-choice).
    pub fn reputation_weight(&self, vote: &Vote) -> f64 {
        self.reputation_of(vote) * self.decay(vote)
    }

    /// `(0.7 * reputation + 0.3 * temporal) * confidence * decay`.
    pub fn blended_weight(&self, vote: &Vote) -> f64 {
        let Some(id) = vote.voter() else {
            return 0.0;
        };
        let blend = self.reputation(id) * REPUTATION_BLEND
            + self.temporal_trust(id) * (1.0 - REPUTATION_BLEND);
        blend * vote.confidence() * self.decay(vote)
    }

    /// `reputation * sqrt(credits) * decay`, with negative credits counting as zero.
    pub fn quadratic_weight(&self, vote: &Vote) -> f64 {
        let credits = if vote.credits.is_nan() { 0.0 } else { vote.credits.max(0.0) };
        self.reputation_of(vote) * credits.sqrt() * self.decay(vote)
    }
}
