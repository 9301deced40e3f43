//! The closed set of aggregation methods.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How validator votes are combined into one decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMethod {
    /// Weighted mean of numeric scores.
    WeightedAverage,
    /// Most-weighted label, needs the majority threshold.
    MajorityRule,
    /// Most-weighted label, needs the supermajority threshold.
    Supermajority,
    /// Most-weighted label, needs the high-consensus threshold.
    ConsensusThreshold,
    /// Reputation blended with temporal trust, scaled by stated confidence.
    #[default]
    ReputationWeighted,
    /// Borda count over each vote's ranking.
    RankedChoice,
    /// Influence grows with the square root of committed credits.
    Quadratic,
}

impl VotingMethod {
    pub const ALL: [VotingMethod; 7] = [
        Self::WeightedAverage,
        Self::MajorityRule,
        Self::Supermajority,
        Self::ConsensusThreshold,
        Self::ReputationWeighted,
        Self::RankedChoice,
        Self::Quadratic,
    ];

    /// Wire name of this method.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeightedAverage => "weighted_average",
            Self::MajorityRule => "majority_rule",
            Self::Supermajority => "supermajority",
            Self::ConsensusThreshold => "consensus_threshold",
            Self::ReputationWeighted => "reputation_weighted",
            Self::RankedChoice => "ranked_choice",
            Self::Quadratic => "quadratic",
        }
    }

    /// Look a method up by wire name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Look a method up by name; unknown names resolve to reputation-weighted.
    pub fn from_name_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }
}

impl fmt::Display for VotingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for method in VotingMethod::ALL {
            assert_eq!(VotingMethod::from_name(method.name()), Some(method));
        }
    }

    #[test]
    fn unknown_name_falls_back_to_reputation_weighted() {
        assert_eq!(VotingMethod::from_name("borda_plus"), None);
        assert_eq!(
            VotingMethod::from_name_or_default("borda_plus"),
            VotingMethod::ReputationWeighted
        );
        assert_eq!(
            VotingMethod::from_name_or_default("  Quadratic "),
            VotingMethod::Quadratic
        );
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&VotingMethod::ConsensusThreshold).unwrap();
        assert_eq!(json, "\"consensus_threshold\"");
    }
}
