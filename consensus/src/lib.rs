//! Consensus: aggregate independent validator votes into one decision.
//!
//! Each validator submits a vote on a proposal. The engine filters out
//! unidentified and low-reputation voters, enforces a quorum, folds
//! delegated reputation into delegatees, weights every remaining vote by
//! reputation, temporal trust and age, and applies one of seven voting
//! methods. Soft conditions (low diversity, low temporal trust) are
//! reported as flags and never block a decision.
//!
//! ## Module overview
//!
//! - [`engine`]: The aggregation pipeline and its entry points.
//! - [`filter`]: Vote acceptance and the quorum gate.
//! - [`delegation`]: One-hop reputation delegation.
//! - [`decay`]: Exponential vote-age decay.
//! - [`weighting`]: Per-vote weights shared by the strategies.
//! - [`tally`]: Weight per decision label with a deterministic winner.
//! - [`strategies`]: The seven voting methods.
//! - [`cross_validation`]: Consistency of outcomes across calls.
//! - [`integrity`]: Advisory manipulation checks.
//! - [`config`]: Tunable thresholds, loadable from TOML.
//! - [`error`]: Consensus error types.

pub mod config;
pub mod cross_validation;
pub mod decay;
pub mod delegation;
pub mod engine;
pub mod error;
pub mod filter;
pub mod integrity;
pub mod strategies;
pub mod tally;
pub mod weighting;

pub use config::ConsensusConfig;
pub use cross_validation::CrossValidationHistory;
pub use delegation::{resolve_delegations, DelegationOutcome};
pub use engine::{aggregate_validator_votes, AggregationRequest, ConsensusEngine};
pub use error::ConsensusError;
pub use filter::{filter_votes, FilteredVotes};
pub use integrity::{validate_voting_integrity, validate_voting_integrity_with_default};
pub use weighting::WeightingModel;
