//! The outcome value of an aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

const NO_CONSENSUS: &str = "no_consensus";
const NO_DECISION: &str = "no_decision";

/// A consensus decision: a numeric score, a label, or a sentinel.
///
/// On the wire this is a bare JSON number or string; the sentinels are the
/// strings `"no_consensus"` and `"no_decision"`. Those two strings are
/// reserved: [`Decision::label`] maps them to the sentinels, so a decision
/// reads back from persisted history exactly as it was produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "DecisionRepr", from = "DecisionRepr")]
pub enum Decision {
    /// Weighted-average style outcome.
    Score(f64),
    /// Plurality style outcome.
    Label(String),
    /// Votes were counted but no option cleared the threshold.
    NoConsensus,
    /// There was nothing to pick from.
    NoDecision,
}

impl Decision {
    /// A label decision. The reserved sentinel strings become sentinels.
    pub fn label(label: impl Into<String>) -> Self {
        DecisionRepr::Text(label.into()).into()
    }

    /// True for `NoConsensus` and `NoDecision`.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::NoConsensus | Self::NoDecision)
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_score(&self) -> Option<f64> {
        match self {
            Self::Score(s) => Some(*s),
            _ => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Score(s) => write!(f, "{s}"),
            Self::Label(l) => f.write_str(l),
            Self::NoConsensus => f.write_str(NO_CONSENSUS),
            Self::NoDecision => f.write_str(NO_DECISION),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DecisionRepr {
    Number(f64),
    Text(String),
}

impl From<Decision> for DecisionRepr {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Score(s) => Self::Number(s),
            Decision::Label(l) => Self::Text(l),
            Decision::NoConsensus => Self::Text(NO_CONSENSUS.to_string()),
            Decision::NoDecision => Self::Text(NO_DECISION.to_string()),
        }
    }
}

impl From<DecisionRepr> for Decision {
    fn from(r: DecisionRepr) -> Self {
        match r {
            DecisionRepr::Number(s) => Self::Score(s),
            DecisionRepr::Text(t) if t == NO_CONSENSUS => Self::NoConsensus,
            DecisionRepr::Text(t) if t == NO_DECISION => Self::NoDecision,
            DecisionRepr::Text(t) => Self::Label(t),
        }
    }
}
