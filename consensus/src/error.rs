use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
