//! Advisory report on suspicious voting patterns.

use crate::validator::ValidatorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A manipulation signature found in a vote set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityFlag {
    /// Some validator voted more than once.
    DuplicateValidators,
    /// Scores are packed into an implausibly narrow band.
    SuspiciousScoreClustering,
    /// Nearly every voter has a very high reputation.
    HighReputationConcentration,
}

impl IntegrityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateValidators => "duplicate_validators",
            Self::SuspiciousScoreClustering => "suspicious_score_clustering",
            Self::HighReputationConcentration => "high_reputation_concentration",
        }
    }
}

impl fmt::Display for IntegrityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub integrity_flags: Vec<IntegrityFlag>,
    /// Raw number of votes inspected.
    pub vote_count: usize,
    pub unique_validators: usize,
    pub avg_reputation: f64,
    /// Validators that appear more than once, in first-seen order.
    #[serde(default)]
    pub duplicate_ids: Vec<ValidatorId>,
}

impl IntegrityReport {
    pub fn has_flag(&self, flag: IntegrityFlag) -> bool {
        self.integrity_flags.contains(&flag)
    }

    pub fn is_clean(&self) -> bool {
        self.integrity_flags.is_empty()
    }
}
