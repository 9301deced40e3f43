use supernova_types::{Decision, Flag, Vote, VoteBreakdown};

use super::StrategyOutcome;
use crate::tally::LabelTally;
use crate::weighting::WeightingModel;

/// Borda count: in a ranking of `n` options, position `i` (0-based) earns
/// `n - i` points, scaled by the voter's reputation and decay.
///
/// Votes without a ranking are skipped.
pub fn ranked_choice(votes: &[Vote], model: &WeightingModel<'_>) -> StrategyOutcome {
    let mut tally = LabelTally::new();
    let mut ranked = 0usize;

    for vote in votes {
        let Some(ranking) = vote.ranking() else {
            continue;
        };
        ranked += 1;
        let weight = model.reputation_weight(vote);
        let n = ranking.len();
        for (i, choice) in ranking.iter().enumerate() {
            tally.add(choice, (n - i) as f64 * weight);
        }
    }

    if ranked == 0 {
        return StrategyOutcome::unresolved(Flag::NoValidRankings);
    }

    let (decision, share) = match tally.winner_share() {
        Some((label, share)) if tally.total() > 0.0 => (Decision::label(label), share),
        _ => (Decision::NoConsensus, 0.0),
    };

    StrategyOutcome::new(
        decision,
        share,
        VoteBreakdown::RankedChoice {
            ranking_scores: tally.rounded(),
        },
    )
}
