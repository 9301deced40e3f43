use supernova_types::{Decision, Vote, VoteBreakdown};
use supernova_utils::round3;

use super::{ratio, StrategyOutcome};
use crate::tally::LabelTally;
use crate::weighting::WeightingModel;

/// Default strategy: reputation blended with temporal trust, scaled by each
/// validator's stated confidence.
///
/// The decision is the weighted mean score. The label carrying the most
/// weight is reported as `top_decision`, and its share of the weight is the
/// confidence.
pub fn reputation_weighted(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let mut tally = LabelTally::new();
    let mut weighted_scores = 0.0;

    for vote in votes {
        let weight = model.blended_weight(vote);
        weighted_scores += vote.score * weight;
        tally.add(vote.decision_label(), weight);
    }

    let total_weight = tally.total();
    let (top_decision, share) = match tally.winner_share() {
        Some((label, share)) if total_weight > 0.0 => (Decision::label(label), share),
        _ => (Decision::NoDecision, 0.0),
    };

    StrategyOutcome::new(
        Decision::Score(round3(ratio(weighted_scores, total_weight))),
        share,
        VoteBreakdown::ReputationWeighted {
            total_weight: round3(total_weight),
            decision_weights: tally.rounded(),
            top_decision,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::Fixture;

    fn top_decision(outcome: &StrategyOutcome) -> &Decision {
        match &outcome.breakdown {
            VoteBreakdown::ReputationWeighted { top_decision, .. } => top_decision,
            other => panic!("unexpected breakdown {other:?}"),
        }
    }

    #[test]
    fn reports_score_and_top_label() {
        let mut fx = Fixture::new(&[("a", 1.0), ("b", 1.0), ("c", 0.5)]);
        fx.temporal_trust = [("a", 1.0), ("b", 1.0), ("c", 0.5)].into_iter().collect();
        let votes = vec![
            Vote::new("a").with_score(1.0).with_confidence(1.0).with_decision("approve"),
            Vote::new("b").with_score(1.0).with_confidence(1.0).with_decision("approve"),
            Vote::new("c").with_score(0.0).with_confidence(1.0).with_decision("reject"),
        ];
        let out = reputation_weighted(&votes, &fx.model());
        // Weights 1.0, 1.0, 0.5.
        assert_eq!(out.decision, Decision::Score(0.8));
        assert_eq!(out.confidence, 0.8);
        assert_eq!(top_decision(&out), &Decision::label("approve"));
    }

    #[test]
    fn confidence_scales_influence() {
        let fx = Fixture::new(&[]);
        let votes = vec![
            Vote::new("a").with_confidence(0.1).with_decision("yes"),
            Vote::new("b").with_confidence(0.1).with_decision("yes"),
            Vote::new("c").with_confidence(0.9).with_decision("no"),
        ];
        let out = reputation_weighted(&votes, &fx.model());
        assert_eq!(top_decision(&out), &Decision::label("no"));
        assert_eq!(out.confidence, 0.818);
    }

    #[test]
    fn zero_confidence_everywhere_is_no_decision() {
        let fx = Fixture::new(&[]);
        let votes = vec![
            Vote::new("a").with_confidence(0.0).with_decision("yes"),
            Vote::new("b").with_confidence(0.0).with_decision("no"),
            Vote::new("c").with_confidence(0.0),
        ];
        let out = reputation_weighted(&votes, &fx.model());
        assert_eq!(out.decision, Decision::Score(0.0));
        assert_eq!(out.confidence, 0.0);
        assert_eq!(top_decision(&out), &Decision::NoDecision);
    }
}
