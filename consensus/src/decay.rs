//! Time decay: older votes count for less.
//!
//! A vote's weight is multiplied by `0.5 ^ (age_days / half_life_days)`,
//! where `age_days` is the number of whole days between the vote's
//! timestamp and the evaluation time. Votes without a usable timestamp, and
//! votes dated in the future, are treated as fresh (factor 1.0).

use chrono::{DateTime, Utc};
use supernova_types::parse_vote_timestamp;

/// Whole days elapsed from `cast_at` to `now`, never negative.
pub fn age_days(cast_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - cast_at).num_days().max(0)
}

/// Decay multiplier for a vote cast at `timestamp`, in `(0, 1]`.
pub fn decay_factor(timestamp: Option<&str>, now: DateTime<Utc>, half_life_days: f64) -> f64 {
    let Some(cast_at) = timestamp.and_then(parse_vote_timestamp) else {
        return 1.0;
    };
    decay_for_age(age_days(cast_at, now), half_life_days)
}

/// Decay multiplier for a known age in whole days.
pub fn decay_for_age(age_days: i64, half_life_days: f64) -> f64 {
    if age_days <= 0 || half_life_days.is_nan() || half_life_days <= 0.0 {
        return 1.0;
    }
    0.5f64.powf(age_days as f64 / half_life_days)
}
