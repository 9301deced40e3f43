//! Vote filter: drop malformed and low-reputation votes, then gate on quorum.

use supernova_types::{ScoreMap, Vote};

use crate::config::ConsensusConfig;

/// Outcome of filtering a raw vote list.
#[derive(Clone, Debug, Default)]
pub struct FilteredVotes {
    /// Votes that passed, in submission order.
    pub accepted: Vec<Vote>,
    /// Votes with no (or a blank) validator id.
    pub missing_id: usize,
    /// Votes from validators below the reputation floor.
    pub below_reputation_floor: usize,
}

impl FilteredVotes {
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Keep votes that have an id and whose validator clears the reputation floor.
pub fn filter_votes(votes: &[Vote], reputations: &ScoreMap, config: &ConsensusConfig) -> FilteredVotes {
    let mut out = FilteredVotes::default();
    for vote in votes {
        let Some(voter) = vote.voter() else {
            out.missing_id += 1;
            continue;
        };
        let reputation = reputations.lookup(voter, config.default_reputation);
        if reputation < config.min_reputation_for_vote {
            tracing::debug!(validator = %voter, reputation, "vote dropped below reputation floor");
            out.below_reputation_floor += 1;
            continue;
        }
        out.accepted.push(vote.clone());
    }
    out
}

/// Whether `count` votes are enough to attempt a decision.
pub fn meets_quorum(count: usize, config: &ConsensusConfig) -> bool {
    count >= config.min_validators_for_consensus
}

#[cfg(test)]
mod tests {
    use super::*;
    use supernova_types::ValidatorId;

    fn reps(entries: &[(&str, f64)]) -> ScoreMap {
        entries.iter().map(|(id, r)| (*id, *r)).collect()
    }

    #[test]
    fn drops_votes_without_id() {
        let votes = vec![Vote::new("a"), Vote::default(), Vote::new("  ")];
        let out = filter_votes(&votes, &ScoreMap::new(), &ConsensusConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out.missing_id, 2);
    }

    #[test]
    fn drops_low_reputation_validators() {
        let votes = vec![Vote::new("a"), Vote::new("b"), Vote::new("c")];
        let out = filter_votes(
            &votes,
            &reps(&[("a", 0.1), ("b", 0.2)]),
            &ConsensusConfig::default(),
        );
        // Floor is inclusive; unknown "c" defaults to 0.5.
        assert_eq!(out.below_reputation_floor, 1);
        let kept: Vec<_> = out.accepted.iter().filter_map(|v| v.voter().cloned()).collect();
        assert_eq!(kept, vec![ValidatorId::from("b"), ValidatorId::from("c")]);
    }

    #[test]
    fn quorum_gate() {
        let config = ConsensusConfig::default();
        assert!(!meets_quorum(2, &config));
        assert!(meets_quorum(3, &config));
    }
}
