//! Vote delegation: a validator hands its reputation to another validator.
//!
//! A vote carrying `delegate_to` is withdrawn from the active set and the
//! delegator's reputation is added to the delegatee's effective reputation.
//! Resolution is a single hop: if the delegatee itself delegated, the
//! transferred weight stays with the delegatee and is not chased further.
//! Transfers always use the delegator's *submitted* reputation, so the
//! order in which delegations are processed does not matter.

use supernova_types::{ScoreMap, ValidatorId, Vote};

/// Active votes and effective reputations after delegation.
#[derive(Clone, Debug)]
pub struct DelegationOutcome {
    /// Votes still cast directly, in submission order.
    pub votes: Vec<Vote>,
    /// Reputations with delegated weight folded in.
    pub reputations: ScoreMap,
    /// (delegator, delegatee) pairs that were applied.
    pub transfers: Vec<(ValidatorId, ValidatorId)>,
}

/// Fold every delegating vote into its delegatee's reputation.
///
/// Delegatees with no reputation entry start from `default_reputation`.
pub fn resolve_delegations(
    votes: Vec<Vote>,
    reputations: &ScoreMap,
    default_reputation: f64,
) -> DelegationOutcome {
    let mut effective = reputations.clone();
    let mut active = Vec::with_capacity(votes.len());
    let mut transfers = Vec::new();

    for vote in votes {
        match (vote.voter(), vote.delegate()) {
            (Some(from), Some(to)) => {
                let weight = reputations.lookup(from, default_reputation);
                effective.add(to, weight, default_reputation);
                tracing::trace!(delegator = %from, delegatee = %to, weight, "delegation applied");
                transfers.push((from.clone(), to.clone()));
            }
            _ => active.push(vote),
        }
    }

    DelegationOutcome {
        votes: active,
        reputations: effective,
        transfers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ValidatorId {
        ValidatorId::from(name)
    }

    #[test]
    fn delegator_is_removed_and_weight_transferred() {
        let votes = vec![
            Vote::new("a").with_delegate("b"),
            Vote::new("b"),
            Vote::new("c"),
        ];
        let reps: ScoreMap = [("a", 0.4), ("b", 0.6)].into_iter().collect();
        let out = resolve_delegations(votes, &reps, 0.5);

        assert_eq!(out.votes.len(), 2);
        assert!(out.votes.iter().all(|v| v.voter() != Some(&id("a"))));
        assert!((out.reputations.lookup(&id("b"), 0.5) - 1.0).abs() < 1e-12);
        assert_eq!(out.transfers, vec![(id("a"), id("b"))]);
    }

    #[test]
    fn unknown_delegatee_starts_from_default() {
        let votes = vec![Vote::new("a").with_delegate("z")];
        let out = resolve_delegations(votes, &ScoreMap::new(), 0.5);
        assert!(out.votes.is_empty());
        assert_eq!(out.reputations.get(&id("z")), Some(1.0));
    }

    #[test]
    fn fan_in_accumulates() {
        let votes = vec![
            Vote::new("d1").with_delegate("hub"),
            Vote::new("d2").with_delegate("hub"),
            Vote::new("d3").with_delegate("hub"),
            Vote::new("hub"),
        ];
        let reps: ScoreMap = [("d1", 0.25), ("d2", 0.25), ("d3", 0.5), ("hub", 0.5)]
            .into_iter()
            .collect();
        let out = resolve_delegations(votes, &reps, 0.5);
        assert_eq!(out.votes.len(), 1);
        assert_eq!(out.reputations.get(&id("hub")), Some(1.5));
    }

    #[test]
    fn chains_are_resolved_one_hop_only() {
        // a -> b -> c: a's weight lands on b, b's weight lands on c.
        let votes = vec![
            Vote::new("a").with_delegate("b"),
            Vote::new("b").with_delegate("c"),
            Vote::new("c"),
        ];
        let reps: ScoreMap = [("a", 0.25), ("b", 0.5), ("c", 0.5)].into_iter().collect();
        let out = resolve_delegations(votes, &reps, 0.5);
        assert_eq!(out.votes.len(), 1);
        assert_eq!(out.reputations.get(&id("b")), Some(0.75));
        assert_eq!(out.reputations.get(&id("c")), Some(1.0));
    }

    #[test]
    fn blank_delegate_is_ignored() {
        let votes = vec![Vote::new("a").with_delegate("")];
        let out = resolve_delegations(votes, &ScoreMap::new(), 0.5);
        assert_eq!(out.votes.len(), 1);
        assert!(out.transfers.is_empty());
    }
}
