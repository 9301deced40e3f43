//! The aggregation pipeline.
//!
//! filter → quorum gate → delegation → quorum gate → diversity / temporal
//! gating (flags only) → strategy → result assembly → optional
//! cross-validation update.

use chrono::{DateTime, Utc};
use supernova_types::{
    ConsensusResult, Flag, IntegrityReport, ScoreMap, Vote, VotingMethod,
};
use supernova_utils::mean;

use crate::config::ConsensusConfig;
use crate::cross_validation::CrossValidationHistory;
use crate::delegation::resolve_delegations;
use crate::filter::{filter_votes, meets_quorum};
use crate::integrity::validate_voting_integrity_with_default;
use crate::strategies;
use crate::weighting::WeightingModel;
use crate::ConsensusError;

/// Everything one aggregation reads. All inputs are borrowed snapshots.
#[derive(Clone, Copy, Debug)]
pub struct AggregationRequest<'a> {
    pub votes: &'a [Vote],
    pub method: VotingMethod,
    /// Per-validator reputation; missing entries use the configured default.
    pub reputations: Option<&'a ScoreMap>,
    /// Per-validator temporal trust; missing entries use the configured default.
    pub temporal_trust: Option<&'a ScoreMap>,
    /// Pool diversity; absent reads as 0.0.
    pub diversity_score: Option<f64>,
    /// Reference time for decay.
    pub now: DateTime<Utc>,
}

impl<'a> AggregationRequest<'a> {
    pub fn new(votes: &'a [Vote], method: VotingMethod, now: DateTime<Utc>) -> Self {
        Self {
            votes,
            method,
            reputations: None,
            temporal_trust: None,
            diversity_score: None,
            now,
        }
    }

    pub fn with_reputations(mut self, reputations: &'a ScoreMap) -> Self {
        self.reputations = Some(reputations);
        self
    }

    pub fn with_temporal_trust(mut self, temporal_trust: &'a ScoreMap) -> Self {
        self.temporal_trust = Some(temporal_trust);
        self
    }

    pub fn with_diversity_score(mut self, diversity_score: f64) -> Self {
        self.diversity_score = Some(diversity_score);
        self
    }
}

/// Stateless consensus engine. Safe to share across threads; the only
/// mutable input is the caller's history, borrowed per call.
#[derive(Clone, Debug, Default)]
pub struct ConsensusEngine {
    config: ConsensusConfig,
}

impl ConsensusEngine {
    pub fn new(config: ConsensusConfig) -> Result<Self, ConsensusError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    /// Aggregate one proposal's votes into a decision.
    ///
    /// Never fails: malformed or insufficient input produces a sentinel
    /// result with diagnostic flags.
    pub fn aggregate(
        &self,
        request: AggregationRequest<'_>,
        history: Option<&mut CrossValidationHistory>,
    ) -> ConsensusResult {
        let config = &self.config;
        let total = request.votes.len();
        if total == 0 {
            tracing::warn!("no votes submitted");
            return ConsensusResult::unresolved(Flag::NoVotes, 0, 0);
        }

        let empty = ScoreMap::new();
        let reputations = request.reputations.unwrap_or(&empty);
        let temporal_trust = request.temporal_trust.unwrap_or(&empty);

        let filtered = filter_votes(request.votes, reputations, config);
        tracing::debug!(
            total,
            accepted = filtered.len(),
            missing_id = filtered.missing_id,
            below_floor = filtered.below_reputation_floor,
            "votes filtered"
        );
        if !meets_quorum(filtered.len(), config) {
            tracing::warn!(
                valid = filtered.len(),
                quorum = config.min_validators_for_consensus,
                "insufficient quorum"
            );
            return ConsensusResult::unresolved(Flag::InsufficientQuorum, total, filtered.len());
        }

        let delegated =
            resolve_delegations(filtered.accepted, reputations, config.default_reputation);
        let active = delegated.votes;
        if !meets_quorum(active.len(), config) {
            tracing::warn!(
                active = active.len(),
                delegated = delegated.transfers.len(),
                quorum = config.min_validators_for_consensus,
                "insufficient quorum after delegation"
            );
            return ConsensusResult::unresolved(Flag::InsufficientQuorum, total, active.len());
        }

        let mut flags = Vec::new();
        let diversity_score = request.diversity_score.unwrap_or(0.0);
        if diversity_score < config.min_diversity_score {
            tracing::warn!(diversity_score, "low validator diversity");
            flags.push(Flag::LowDiversityWarning);
        }
        let avg_temporal_trust = mean(active.iter().map(|v| {
            v.voter().map_or(config.default_temporal_trust, |id| {
                temporal_trust.lookup(id, config.default_temporal_trust)
            })
        }))
        .unwrap_or(config.default_temporal_trust);
        if avg_temporal_trust < config.min_temporal_trust {
            tracing::warn!(avg_temporal_trust, "low temporal trust");
            flags.push(Flag::LowTemporalTrust);
        }

        let model = WeightingModel::new(config, &delegated.reputations, temporal_trust, request.now);
        let outcome = strategies::run(request.method, &active, &model);
        flags.extend(outcome.flags);

        let mut result = ConsensusResult {
            consensus_decision: outcome.decision,
            consensus_confidence: outcome.confidence,
            voting_method: Some(request.method),
            vote_breakdown: outcome.breakdown,
            flags,
            quorum_met: true,
            total_validators: total,
            valid_votes: active.len(),
            diversity_score: Some(diversity_score),
            cross_validation: None,
        };

        if let Some(history) = history {
            result.cross_validation = Some(history.record_result(&result));
        }

        tracing::info!(
            method = %request.method,
            decision = %result.consensus_decision,
            confidence = result.consensus_confidence,
            "consensus reached"
        );
        result
    }

    /// Run the advisory integrity check on a raw vote list, using the
    /// configured default reputation for unknown validators.
    pub fn check_integrity(&self, votes: &[Vote], reputations: &ScoreMap) -> IntegrityReport {
        validate_voting_integrity_with_default(votes, reputations, self.config.default_reputation)
    }
}

/// Aggregate with the default configuration.
///
/// `current_time` defaults to now; `method` names are resolved with
/// [`VotingMethod::from_name_or_default`] by callers holding strings.
pub fn aggregate_validator_votes(
    votes: &[Vote],
    method: VotingMethod,
    reputations: Option<&ScoreMap>,
    diversity_score: Option<f64>,
    temporal_trust: Option<&ScoreMap>,
    cross_validation_history: Option<&mut CrossValidationHistory>,
    current_time: Option<DateTime<Utc>>,
) -> ConsensusResult {
    let request = AggregationRequest {
        votes,
        method,
        reputations,
        temporal_trust,
        diversity_score,
        now: current_time.unwrap_or_else(Utc::now),
    };
    ConsensusEngine::default().aggregate(request, cross_validation_history)
}
