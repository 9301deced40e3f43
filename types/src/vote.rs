//! A single validator's vote on a proposal.

use crate::validator::ValidatorId;
use serde::{Deserialize, Serialize};

/// Label used for votes that carry no explicit decision.
pub const ABSTAIN: &str = "abstain";

/// One validator's opinion on a proposal.
///
/// Every field except the id is optional on the wire; missing numeric
/// fields take the conventional defaults (score and confidence 0.5,
/// credits 1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Who cast the vote. Votes without an id are discarded by the filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator_id: Option<ValidatorId>,
    #[serde(default = "default_score")]
    pub score: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Discrete choice; `None` reads as "abstain" except under quadratic voting.
    /// `"no_consensus"` and `"no_decision"` are reserved: a winning label
    /// spelled that way is reported as the matching sentinel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    /// Preference order, best first. Only ranked-choice reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Vec<String>>,
    /// Voice credits committed. Only quadratic voting reads it.
    #[serde(default = "default_credits")]
    pub credits: f64,
    /// When set, the vote is withdrawn and its reputation moves to this validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_to: Option<ValidatorId>,
    /// ISO-8601 cast time. Unparsable values are treated as fresh.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

fn default_score() -> f64 {
    0.5
}

fn default_confidence() -> f64 {
    0.5
}

fn default_credits() -> f64 {
    1.0
}

impl Vote {
    /// A vote from `validator` with every other field at its default.
    pub fn new(validator: impl Into<ValidatorId>) -> Self {
        Self {
            validator_id: Some(validator.into()),
            ..Self::default()
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = Some(decision.into());
        self
    }

    pub fn with_ranking<I, S>(mut self, ranking: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranking = Some(ranking.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_delegate(mut self, delegate: impl Into<ValidatorId>) -> Self {
        self.delegate_to = Some(delegate.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// The validator id, if present and non-blank.
    pub fn voter(&self) -> Option<&ValidatorId> {
        self.validator_id.as_ref().filter(|id| id.is_valid())
    }

    /// The decision label, falling back to `"abstain"`.
    pub fn decision_label(&self) -> &str {
        self.decision.as_deref().unwrap_or(ABSTAIN)
    }

    /// The explicit decision label, treating an empty string as missing.
    pub fn explicit_decision(&self) -> Option<&str> {
        self.decision.as_deref().filter(|d| !d.is_empty())
    }

    /// Stated confidence clamped to `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        if self.confidence.is_nan() {
            return 0.0;
        }
        self.confidence.clamp(0.0, 1.0)
    }

    /// The delegate, if this vote delegates to a non-blank id.
    pub fn delegate(&self) -> Option<&ValidatorId> {
        self.delegate_to.as_ref().filter(|id| id.is_valid())
    }

    /// Non-empty ranking, if any.
    pub fn ranking(&self) -> Option<&[String]> {
        self.ranking.as_deref().filter(|r| !r.is_empty())
    }
}

impl Default for Vote {
    fn default() -> Self {
        Self {
            validator_id: None,
            score: default_score(),
            confidence: default_confidence(),
            decision: None,
            ranking: None,
            credits: default_credits(),
            delegate_to: None,
            timestamp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let vote: Vote = serde_json::from_str(r#"{"validator_id": "v1"}"#).unwrap();
        assert_eq!(vote.voter(), Some(&ValidatorId::from("v1")));
        assert_eq!(vote.score, 0.5);
        assert_eq!(vote.confidence, 0.5);
        assert_eq!(vote.credits, 1.0);
        assert_eq!(vote.decision_label(), "abstain");
        assert!(vote.explicit_decision().is_none());
        assert!(vote.delegate().is_none());
    }

    #[test]
    fn vote_without_id_deserializes() {
        let vote: Vote = serde_json::from_str(r#"{"score": 0.9}"#).unwrap();
        assert!(vote.voter().is_none());
    }

    #[test]
    fn blank_id_counts_as_missing() {
        let vote = Vote::new("");
        assert!(vote.voter().is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Vote::new("v").with_confidence(4.0).confidence(), 1.0);
        assert_eq!(Vote::new("v").with_confidence(-1.0).confidence(), 0.0);
        assert_eq!(Vote::new("v").with_confidence(f64::NAN).confidence(), 0.0);
    }

    #[test]
    fn empty_ranking_is_ignored() {
        let vote = Vote::new("v").with_ranking(Vec::<String>::new());
        assert!(vote.ranking().is_none());
        let vote = Vote::new("v").with_ranking(["a", "b"]);
        assert_eq!(vote.ranking().map(|r| r.len()), Some(2));
    }
}
