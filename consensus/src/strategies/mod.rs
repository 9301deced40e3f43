//! Aggregation strategies.
//!
//! Each strategy is a pure function of the active votes and a
//! [`WeightingModel`]; [`run`] dispatches on the closed [`VotingMethod`] set.
//!
//! | Method | Decision | Weight per vote |
//! |---|---|---|
//! | weighted average | numeric score | capped reputation × decay |
//! | majority / supermajority / threshold | label or `no_consensus` | capped reputation × decay |
//! | reputation weighted | numeric score (+ top label) | blended trust × confidence × decay |
//! | ranked choice | label | reputation × decay × Borda points |
//! | quadratic | label or `no_consensus` | reputation × √credits × decay |

mod majority;
mod quadratic;
mod ranked_choice;
mod reputation_weighted;
mod weighted_average;

pub use majority::{consensus_threshold, majority_rule, supermajority};
pub use quadratic::quadratic;
pub use ranked_choice::ranked_choice;
pub use reputation_weighted::reputation_weighted;
pub use weighted_average::weighted_average;

use supernova_types::{Decision, Flag, Vote, VoteBreakdown, VotingMethod};

use crate::weighting::WeightingModel;

/// What a strategy contributes to the final result.
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyOutcome {
    pub decision: Decision,
    /// Already clamped to `[0, 1]` and rounded.
    pub confidence: f64,
    pub breakdown: VoteBreakdown,
    /// Strategy-specific diagnostics, e.g. `no_valid_rankings`.
    pub flags: Vec<Flag>,
}

impl StrategyOutcome {
    pub(crate) fn new(decision: Decision, confidence: f64, breakdown: VoteBreakdown) -> Self {
        Self {
            decision,
            confidence: supernova_utils::round3(confidence.clamp(0.0, 1.0)),
            breakdown,
            flags: Vec::new(),
        }
    }

    /// The strategy had nothing to count.
    pub(crate) fn unresolved(reason: Flag) -> Self {
        Self {
            decision: Decision::NoConsensus,
            confidence: 0.0,
            breakdown: VoteBreakdown::Unresolved { reason },
            flags: vec![reason],
        }
    }
}

/// Aggregate `votes` with `method`.
pub fn run(method: VotingMethod, votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    match method {
        VotingMethod::WeightedAverage => weighted_average(votes, model),
        VotingMethod::MajorityRule => majority_rule(votes, model),
        VotingMethod::Supermajority => supermajority(votes, model),
        VotingMethod::ConsensusThreshold => consensus_threshold(votes, model),
        VotingMethod::ReputationWeighted => reputation_weighted(votes, model),
        VotingMethod::RankedChoice => ranked_choice(votes, model),
        VotingMethod::Quadratic => quadratic(votes, model),
    }
}

/// `numerator / denominator`, or 0 when nothing was weighted.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use supernova_types::ScoreMap;

    use crate::config::ConsensusConfig;
    use crate::weighting::WeightingModel;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
    }

    /// Fixture owning everything a [`WeightingModel`] borrows.
    pub struct Fixture {
        pub config: ConsensusConfig,
        pub reputations: ScoreMap,
        pub temporal_trust: ScoreMap,
    }

    impl Fixture {
        pub fn new(reputations: &[(&str, f64)]) -> Self {
            Self {
                config: ConsensusConfig::default(),
                reputations: reputations.iter().map(|(id, r)| (*id, *r)).collect(),
                temporal_trust: ScoreMap::new(),
            }
        }

        pub fn model(&self) -> WeightingModel<'_> {
            WeightingModel::new(&self.config, &self.reputations, &self.temporal_trust, now())
        }
    }
}
