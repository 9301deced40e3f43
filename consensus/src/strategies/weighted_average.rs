use supernova_types::{Decision, Vote, VoteBreakdown};
use supernova_utils::{mean, round3};

use super::{ratio, StrategyOutcome};
use crate::weighting::WeightingModel;

/// Weighted mean of scores; confidence is the same weighted mean of stated confidences.
pub fn weighted_average(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let mut weighted_sum = 0.0;
    let mut confidence_sum = 0.0;
    let mut total_weight = 0.0;

    for vote in votes {
        let weight = model.capped_weight(vote);
        weighted_sum += vote.score * weight;
        confidence_sum += vote.confidence() * weight;
        total_weight += weight;
    }

    let raw_average = mean(votes.iter().map(|v| v.score)).unwrap_or(0.0);

    StrategyOutcome::new(
        Decision::Score(round3(ratio(weighted_sum, total_weight))),
        ratio(confidence_sum, total_weight),
        VoteBreakdown::WeightedAverage {
            total_weight: round3(total_weight),
            raw_average: round3(raw_average),
        },
    )
}
