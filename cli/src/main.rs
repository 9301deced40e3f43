//! supernova-consensus: aggregate validator votes from the command line.
//!
//! Reads votes and trust signals as JSON, prints the result as JSON on
//! stdout. Logs go to stderr.

mod files;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use supernova_consensus::{AggregationRequest, ConsensusConfig, ConsensusEngine};
use supernova_types::{parse_vote_timestamp, VotingMethod};
use supernova_utils::LogFormat;

use crate::files::{load_history, load_signals, load_votes, save_history};

#[derive(Parser)]
#[command(name = "supernova-consensus", about = "Multi-validator consensus aggregation")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "SUPERNOVA_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "SUPERNOVA_LOG_FORMAT")]
    log_format: LogFormat,

    /// Path to a TOML file overriding the default thresholds.
    #[arg(long, env = "SUPERNOVA_CONSENSUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Aggregate a vote list into a consensus result.
    Aggregate {
        /// JSON array of votes.
        #[arg(long)]
        votes: PathBuf,

        /// Voting method; unknown names fall back to reputation_weighted.
        #[arg(long, default_value = "reputation_weighted")]
        method: String,

        /// JSON object with reputations, temporal_trust and diversity_score.
        #[arg(long)]
        signals: Option<PathBuf>,

        /// Cross-validation history file, created if missing and updated in place.
        #[arg(long)]
        history: Option<PathBuf>,

        /// Reference time for vote decay (defaults to now).
        #[arg(long)]
        now: Option<String>,
    },
    /// Run the integrity checks on a vote list.
    Integrity {
        #[arg(long)]
        votes: PathBuf,

        #[arg(long)]
        signals: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    supernova_utils::init_logging(cli.log_format, &cli.log_level);

    let config = load_config(cli.config.as_deref());
    let engine = ConsensusEngine::new(config).context("invalid consensus configuration")?;

    match cli.command {
        Command::Aggregate {
            votes,
            method,
            signals,
            history,
            now,
        } => {
            let votes = load_votes(&votes)?;
            let signals = load_signals(signals.as_deref())?;
            let method = resolve_method(&method);
            let now = match now {
                Some(raw) => parse_vote_timestamp(&raw)
                    .with_context(|| format!("unrecognised --now timestamp '{raw}'"))?,
                None => Utc::now(),
            };

            let mut request = AggregationRequest::new(&votes, method, now)
                .with_reputations(&signals.reputations)
                .with_temporal_trust(&signals.temporal_trust);
            request.diversity_score = signals.diversity_score;

            let result = match history {
                Some(path) => {
                    let mut log = load_history(&path)?;
                    let result = engine.aggregate(request, Some(&mut log));
                    save_history(&path, &log)?;
                    result
                }
                None => engine.aggregate(request, None),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Integrity { votes, signals } => {
            let votes = load_votes(&votes)?;
            let signals = load_signals(signals.as_deref())?;
            let report = engine.check_integrity(&votes, &signals.reputations);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Load thresholds from `path`, falling back to defaults when the file is
/// unreadable or malformed.
fn load_config(path: Option<&Path>) -> ConsensusConfig {
    let Some(path) = path else {
        return ConsensusConfig::default();
    };
    match ConsensusConfig::from_toml_file(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load config file {}: {e}, using defaults",
                path.display()
            );
            ConsensusConfig::default()
        }
    }
}

fn resolve_method(name: &str) -> VotingMethod {
    VotingMethod::from_name(name).unwrap_or_else(|| {
        tracing::warn!("unknown voting method '{name}', using reputation_weighted");
        VotingMethod::default()
    })
}
