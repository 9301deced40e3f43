use supernova_types::{Decision, Flag, Vote, VoteBreakdown};

use super::StrategyOutcome;
use crate::tally::LabelTally;
use crate::weighting::WeightingModel;

/// Quadratic voting: influence grows with the square root of committed
/// credits. The winner still needs the majority threshold.
///
/// Votes with no explicit decision are skipped.
pub fn quadratic(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let mut tally = LabelTally::new();
    for vote in votes {
        if let Some(decision) = vote.explicit_decision() {
            tally.add(decision, model.quadratic_weight(vote));
        }
    }

    if tally.is_empty() {
        return StrategyOutcome::unresolved(Flag::NoValidDecisions);
    }

    let threshold = model.config().majority_threshold;
    let (decision, share) = match tally.winner_share() {
        Some((label, share)) if share > 0.0 && share >= threshold => {
            (Decision::label(label), share)
        }
        Some((_, share)) => (Decision::NoConsensus, share),
        None => (Decision::NoConsensus, 0.0),
    };
    let meets_threshold = !decision.is_sentinel();

    StrategyOutcome::new(
        decision,
        share,
        VoteBreakdown::Quadratic {
            decision_weights: tally.rounded(),
            meets_threshold,
        },
    )
}
