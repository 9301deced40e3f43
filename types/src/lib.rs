//! Data model for multi-validator consensus aggregation.
//!
//! This crate defines the plain records shared by every other crate in the
//! workspace: validator identities, votes, per-validator score maps, voting
//! methods, consensus results and integrity reports. Nothing here computes a
//! consensus; see `supernova-consensus` for the engine.

pub mod decision;
pub mod history;
pub mod integrity;
pub mod method;
pub mod result;
pub mod score_map;
pub mod time;
pub mod validator;
pub mod vote;

pub use decision::Decision;
pub use history::{CrossValidationReport, HistoryEntry};
pub use integrity::{IntegrityFlag, IntegrityReport};
pub use method::VotingMethod;
pub use result::{ConsensusResult, Flag, ThresholdTally, VoteBreakdown};
pub use score_map::ScoreMap;
pub use time::parse_vote_timestamp;
pub use validator::ValidatorId;
pub use vote::Vote;
