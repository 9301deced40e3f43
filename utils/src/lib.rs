//! Shared utilities for the consensus workspace.

pub mod logging;
pub mod numeric;

pub use logging::{init_logging, LogFormat};
pub use numeric::{mean, round3, round_to};
