//! Integrity checking: spot manipulation signatures in a raw vote set.
//!
//! Advisory only: the checker never blocks aggregation and is not part of
//! the aggregation pipeline. Callers run it alongside and decide what to do
//! with the findings.

use std::collections::HashSet;

use supernova_types::{IntegrityFlag, IntegrityReport, ScoreMap, ValidatorId, Vote};
use supernova_utils::{mean, round3};

/// Score spread below which more than two votes look coordinated.
pub const CLUSTERING_RANGE: f64 = 0.1;

/// A reputation above this counts as "high".
pub const HIGH_REPUTATION: f64 = 0.8;

/// Share of high-reputation voters above which the pool looks concentrated.
pub const HIGH_REPUTATION_SHARE: f64 = 0.8;

/// Reputation assumed for validators missing from `reputations` when no
/// default is supplied.
pub const DEFAULT_REPUTATION: f64 = 0.5;

/// Inspect a raw vote list for duplicate voters, clustered scores and
/// reputation concentration.
pub fn validate_voting_integrity(votes: &[Vote], reputations: &ScoreMap) -> IntegrityReport {
    validate_voting_integrity_with_default(votes, reputations, DEFAULT_REPUTATION)
}

/// As [`validate_voting_integrity`], with validators missing from
/// `reputations` assumed to hold `default_reputation`.
pub fn validate_voting_integrity_with_default(
    votes: &[Vote],
    reputations: &ScoreMap,
    default_reputation: f64,
) -> IntegrityReport {
    let mut flags = Vec::new();

    let mut seen: HashSet<&ValidatorId> = HashSet::new();
    let mut duplicate_ids: Vec<ValidatorId> = Vec::new();
    for id in votes.iter().filter_map(Vote::voter) {
        if !seen.insert(id) && !duplicate_ids.contains(id) {
            duplicate_ids.push(id.clone());
        }
    }
    if !duplicate_ids.is_empty() {
        flags.push(IntegrityFlag::DuplicateValidators);
    }

    if votes.len() > 2 && score_range(votes) < CLUSTERING_RANGE {
        flags.push(IntegrityFlag::SuspiciousScoreClustering);
    }

    let voter_reputations: Vec<f64> = votes
        .iter()
        .map(|v| {
            v.voter()
                .map_or(default_reputation, |id| reputations.lookup(id, default_reputation))
        })
        .collect();
    let high = voter_reputations.iter().filter(|&&r| r > HIGH_REPUTATION).count();
    if !voter_reputations.is_empty()
        && high as f64 / voter_reputations.len() as f64 > HIGH_REPUTATION_SHARE
    {
        flags.push(IntegrityFlag::HighReputationConcentration);
    }

    if !flags.is_empty() {
        tracing::warn!(
            flags = ?flags,
            votes = votes.len(),
            duplicates = duplicate_ids.len(),
            "voting integrity check raised flags"
        );
    }

    IntegrityReport {
        integrity_flags: flags,
        vote_count: votes.len(),
        unique_validators: seen.len(),
        avg_reputation: round3(mean(voter_reputations).unwrap_or(0.0)),
        duplicate_ids,
    }
}

fn score_range(votes: &[Vote]) -> f64 {
    let (min, max) = votes
        .iter()
        .map(|v| v.score)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s), hi.max(s))
        });
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reps(entries: &[(&str, f64)]) -> ScoreMap {
        entries.iter().map(|(id, r)| (*id, *r)).collect()
    }

    #[test]
    fn clean_vote_set_has_no_flags() {
        let votes = vec![
            Vote::new("a").with_score(0.1),
            Vote::new("b").with_score(0.5),
            Vote::new("c").with_score(0.9),
        ];
        let report = validate_voting_integrity(&votes, &reps(&[("a", 0.6)]));
        assert!(report.is_clean());
        assert_eq!(report.vote_count, 3);
        assert_eq!(report.unique_validators, 3);
        assert_eq!(report.avg_reputation, 0.533);
    }

    #[test]
    fn duplicates_are_reported_once() {
        let votes = vec![
            Vote::new("a").with_score(0.1),
            Vote::new("a").with_score(0.9),
            Vote::new("a").with_score(0.5),
            Vote::new("b").with_score(0.2),
        ];
        let report = validate_voting_integrity(&votes, &ScoreMap::new());
        assert!(report.has_flag(IntegrityFlag::DuplicateValidators));
        assert_eq!(report.duplicate_ids, vec![ValidatorId::from("a")]);
        assert_eq!(report.unique_validators, 2);
    }

    #[test]
    fn tight_scores_look_clustered() {
        let votes = vec![
            Vote::new("a").with_score(0.70),
            Vote::new("b").with_score(0.72),
            Vote::new("c").with_score(0.75),
        ];
        let report = validate_voting_integrity(&votes, &ScoreMap::new());
        assert!(report.has_flag(IntegrityFlag::SuspiciousScoreClustering));
    }

    #[test]
    fn two_identical_scores_are_not_clustering() {
        let votes = vec![Vote::new("a").with_score(0.7), Vote::new("b").with_score(0.7)];
        let report = validate_voting_integrity(&votes, &ScoreMap::new());
        assert!(!report.has_flag(IntegrityFlag::SuspiciousScoreClustering));
    }

    #[test]
    fn high_reputation_concentration() {
        let votes: Vec<Vote> = ["a", "b", "c", "d", "e"]
            .iter()
            .enumerate()
            .map(|(i, id)| Vote::new(*id).with_score(i as f64 * 0.2))
            .collect();
        let all_high = reps(&[("a", 0.9), ("b", 0.9), ("c", 0.95), ("d", 0.85), ("e", 0.99)]);
        let report = validate_voting_integrity(&votes, &all_high);
        assert!(report.has_flag(IntegrityFlag::HighReputationConcentration));

        // Exactly 80% high is not "more than" 80%.
        let four_of_five = reps(&[("a", 0.9), ("b", 0.9), ("c", 0.95), ("d", 0.85), ("e", 0.5)]);
        let report = validate_voting_integrity(&votes, &four_of_five);
        assert!(!report.has_flag(IntegrityFlag::HighReputationConcentration));
    }

    #[test]
    fn unknown_validators_use_the_supplied_default() {
        let votes: Vec<Vote> = ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, id)| Vote::new(*id).with_score(i as f64 * 0.4))
            .collect();
        let report = validate_voting_integrity_with_default(&votes, &ScoreMap::new(), 0.9);
        assert_eq!(report.avg_reputation, 0.9);
        assert!(report.has_flag(IntegrityFlag::HighReputationConcentration));

        let report = validate_voting_integrity(&votes, &ScoreMap::new());
        assert_eq!(report.avg_reputation, 0.5);
        assert!(report.is_clean());
    }

    #[test]
    fn empty_vote_set_is_clean() {
        let report = validate_voting_integrity(&[], &ScoreMap::new());
        assert!(report.is_clean());
        assert_eq!(report.avg_reputation, 0.0);
        assert_eq!(report.unique_validators, 0);
    }
}
