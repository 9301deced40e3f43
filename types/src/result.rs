//! Consensus results and their diagnostics.

use crate::decision::Decision;
use crate::history::CrossValidationReport;
use crate::method::VotingMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Warning and diagnostic tags attached to a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// The vote list was empty.
    NoVotes,
    /// Fewer than the quorum of votes survived filtering.
    InsufficientQuorum,
    /// The pool's diversity score is below the configured minimum.
    LowDiversityWarning,
    /// The voters' mean temporal trust is below the configured minimum.
    LowTemporalTrust,
    /// Ranked-choice found no vote with a ranking.
    NoValidRankings,
    /// Quadratic voting found no vote with a decision.
    NoValidDecisions,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoVotes => "no_votes",
            Self::InsufficientQuorum => "insufficient_quorum",
            Self::LowDiversityWarning => "low_diversity_warning",
            Self::LowTemporalTrust => "low_temporal_trust",
            Self::NoValidRankings => "no_valid_rankings",
            Self::NoValidDecisions => "no_valid_decisions",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tally detail shared by the three threshold-gated label strategies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTally {
    /// Accumulated weight per decision label.
    pub decision_weights: BTreeMap<String, f64>,
    /// Share of weight the winner needed.
    pub threshold: f64,
    pub meets_threshold: bool,
}

/// Method-specific detail of how a decision was reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum VoteBreakdown {
    WeightedAverage {
        total_weight: f64,
        /// Unweighted mean of the scores, for comparison.
        raw_average: f64,
    },
    MajorityRule(ThresholdTally),
    Supermajority(ThresholdTally),
    ConsensusThreshold(ThresholdTally),
    ReputationWeighted {
        total_weight: f64,
        decision_weights: BTreeMap<String, f64>,
        /// Label carrying the most weight.
        top_decision: Decision,
    },
    RankedChoice {
        /// Borda points per option.
        ranking_scores: BTreeMap<String, f64>,
    },
    Quadratic {
        decision_weights: BTreeMap<String, f64>,
        meets_threshold: bool,
    },
    /// No strategy produced a decision.
    #[serde(rename = "none")]
    Unresolved { reason: Flag },
}

/// The outcome of aggregating one proposal's votes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub consensus_decision: Decision,
    /// Share of effective weight behind the decision, in `[0, 1]`.
    pub consensus_confidence: f64,
    /// `None` when aggregation stopped before any strategy ran.
    pub voting_method: Option<VotingMethod>,
    pub vote_breakdown: VoteBreakdown,
    pub flags: Vec<Flag>,
    pub quorum_met: bool,
    /// Votes submitted, before filtering.
    pub total_validators: usize,
    /// Votes that took part in the decision.
    pub valid_votes: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_validation: Option<CrossValidationReport>,
}

impl ConsensusResult {
    /// A result that carries no decision, tagged with `reason`.
    pub fn unresolved(reason: Flag, total_validators: usize, valid_votes: usize) -> Self {
        Self {
            consensus_decision: Decision::NoConsensus,
            consensus_confidence: 0.0,
            voting_method: None,
            vote_breakdown: VoteBreakdown::Unresolved { reason },
            flags: vec![reason],
            quorum_met: false,
            total_validators,
            valid_votes,
            diversity_score: None,
            cross_validation: None,
        }
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}
