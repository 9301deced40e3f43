//! Threshold-gated plurality: majority, supermajority, and high-consensus.
//!
//! All three share one tally of capped-reputation weight per decision label
//! and differ only in the share the winner must reach.

use supernova_types::{Decision, ThresholdTally, Vote, VoteBreakdown};

use super::StrategyOutcome;
use crate::tally::LabelTally;
use crate::weighting::WeightingModel;

fn tally_decisions(votes: &[Vote], model: &WeightingModel<'_>) -> LabelTally {
    let mut tally = LabelTally::new();
    for vote in votes {
        tally.add(vote.decision_label(), model.capped_weight(vote));
    }
    tally
}

fn threshold_vote(
    votes: &[Vote],
    model: &WeightingModel<'_>,
    threshold: f64,
    breakdown: fn(ThresholdTally) -> VoteBreakdown,
) -> StrategyOutcome {
    let tally = tally_decisions(votes, model);
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
        breakdown(ThresholdTally {
            decision_weights: tally.rounded(),
            threshold,
            meets_threshold,
        }),
    )
}

/// Winner needs the majority threshold (default 51%).
pub fn majority_rule(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let threshold = model.config().majority_threshold;
    threshold_vote(votes, model, threshold, VoteBreakdown::MajorityRule)
}

/// Winner needs the supermajority threshold (default 67%).
pub fn supermajority(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let threshold = model.config().supermajority_threshold;
    threshold_vote(votes, model, threshold, VoteBreakdown::Supermajority)
}

/// Winner needs the high-consensus threshold (default 80%).
pub fn consensus_threshold(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let threshold = model.config().consensus_threshold;
    threshold_vote(votes, model, threshold, VoteBreakdown::ConsensusThreshold)
}
