//! Opaque validator identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the validator that cast a vote.
///
/// The engine never interprets the contents; it only compares identifiers.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorId(String);

impl ValidatorId {
    /// Create a validator id from a raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An id that is empty or only whitespace counts as absent.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ValidatorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ValidatorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
