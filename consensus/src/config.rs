//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConsensusError;

/// Tunable constants of the consensus engine.
///
/// Can be loaded from a TOML file via [`ConsensusConfig::from_toml_file`] or
/// built programmatically. Every field has a default, so a partial (or empty)
/// file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    // ── Quorum ─────────────────────────────────────────────────────────
    /// Valid votes required before any decision is attempted.
    ///
    /// Values below the default of 3 are accepted but opt out of the
    /// guarantee that no decision rests on fewer than three validators.
    #[serde(default = "default_min_validators")]
    pub min_validators_for_consensus: usize,

    /// Pool diversity below this raises `low_diversity_warning`.
    #[serde(default = "default_min_diversity")]
    pub min_diversity_score: f64,

    /// Mean temporal trust below this raises `low_temporal_trust`.
    #[serde(default = "default_min_temporal_trust")]
    pub min_temporal_trust: f64,

    // ── Thresholds ─────────────────────────────────────────────────────
    #[serde(default = "default_majority_threshold")]
    pub majority_threshold: f64,

    #[serde(default = "default_supermajority_threshold")]
    pub supermajority_threshold: f64,

    /// Threshold for high-stakes decisions.
    #[serde(default = "default_consensus_threshold")]
    pub consensus_threshold: f64,

    // ── Reputation ─────────────────────────────────────────────────────
    /// Validators below this reputation are not counted at all.
    #[serde(default = "default_min_reputation")]
    pub min_reputation_for_vote: f64,

    /// Cap on the scaled reputation contribution of one vote.
    #[serde(default = "default_max_reputation_weight")]
    pub max_reputation_weight: f64,

    /// Reputation assumed for validators the tracker does not know.
    #[serde(default = "default_score")]
    pub default_reputation: f64,

    /// Temporal trust assumed for validators the checker does not know.
    #[serde(default = "default_score")]
    pub default_temporal_trust: f64,

    // ── Decay ──────────────────────────────────────────────────────────
    /// Vote weight halves every this many days of age.
    #[serde(default = "default_half_life_days")]
    pub vote_decay_half_life_days: f64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_min_validators() -> usize {
    3
}

fn default_min_diversity() -> f64 {
    0.3
}

fn default_min_temporal_trust() -> f64 {
    0.5
}

fn default_majority_threshold() -> f64 {
    0.51
}

fn default_supermajority_threshold() -> f64 {
    0.67
}

fn default_consensus_threshold() -> f64 {
    0.80
}

fn default_min_reputation() -> f64 {
    0.2
}

fn default_max_reputation_weight() -> f64 {
    3.0
}

fn default_score() -> f64 {
    0.5
}

fn default_half_life_days() -> f64 {
    30.0
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ConsensusConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConsensusError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConsensusError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConsensusError> {
        let config: Self = toml::from_str(s).map_err(|e| ConsensusError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConsensusError> {
        toml::to_string_pretty(self).map_err(|e| ConsensusError::Config(e.to_string()))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConsensusError> {
        if self.min_validators_for_consensus == 0 {
            return Err(ConsensusError::InvalidConfig {
                field: "min_validators_for_consensus",
                reason: "must be at least 1".into(),
            });
        }
        let unit_fields = [
            ("min_diversity_score", self.min_diversity_score),
            ("min_temporal_trust", self.min_temporal_trust),
            ("majority_threshold", self.majority_threshold),
            ("supermajority_threshold", self.supermajority_threshold),
            ("consensus_threshold", self.consensus_threshold),
            ("min_reputation_for_vote", self.min_reputation_for_vote),
            ("default_reputation", self.default_reputation),
            ("default_temporal_trust", self.default_temporal_trust),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConsensusError::InvalidConfig {
                    field,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        if !self.max_reputation_weight.is_finite() || self.max_reputation_weight <= 0.0 {
            return Err(ConsensusError::InvalidConfig {
                field: "max_reputation_weight",
                reason: format!("{} must be positive", self.max_reputation_weight),
            });
        }
        if self.vote_decay_half_life_days.is_nan() || self.vote_decay_half_life_days <= 0.0 {
            return Err(ConsensusError::InvalidConfig {
                field: "vote_decay_half_life_days",
                reason: format!("{} must be positive", self.vote_decay_half_life_days),
            });
        }
        Ok(())
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            min_validators_for_consensus: default_min_validators(),
            min_diversity_score: default_min_diversity(),
            min_temporal_trust: default_min_temporal_trust(),
            majority_threshold: default_majority_threshold(),
            supermajority_threshold: default_supermajority_threshold(),
            consensus_threshold: default_consensus_threshold(),
            min_reputation_for_vote: default_min_reputation(),
            max_reputation_weight: default_max_reputation_weight(),
            default_reputation: default_score(),
            default_temporal_trust: default_score(),
            vote_decay_half_life_days: default_half_life_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ConsensusConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = ConsensusConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = ConsensusConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.min_validators_for_consensus, 3);
        assert_eq!(config.majority_threshold, 0.51);
        assert_eq!(config.max_reputation_weight, 3.0);
        assert_eq!(config.vote_decay_half_life_days, 30.0);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            min_validators_for_consensus = 5
            consensus_threshold = 0.9
        "#;
        let config = ConsensusConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.min_validators_for_consensus, 5);
        assert_eq!(config.consensus_threshold, 0.9);
        assert_eq!(config.supermajority_threshold, 0.67);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let err = ConsensusConfig::from_toml_str("majority_threshold = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConsensusError::InvalidConfig {
                field: "majority_threshold",
                ..
            }
        ));
    }

    #[test]
    fn zero_quorum_and_half_life_rejected() {
        let config = ConsensusConfig {
            min_validators_for_consensus: 0,
            ..ConsensusConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ConsensusConfig {
            vote_decay_half_life_days: 0.0,
            ..ConsensusConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn quorum_below_three_is_an_explicit_opt_out() {
        let config = ConsensusConfig {
            min_validators_for_consensus: 2,
            ..ConsensusConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(ConsensusConfig::default().min_validators_for_consensus, 3);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_reputation_for_vote = 0.4").unwrap();
        let config = ConsensusConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.min_reputation_for_vote, 0.4);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = ConsensusConfig::from_toml_file("/nonexistent/consensus.toml").unwrap_err();
        assert!(matches!(err, ConsensusError::Config(_)));
    }
}
