//! commitvote: commit-reveal voting over a local LMDB ledger.

mod commands;
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use commitvote_session::VotingSession;
use commitvote_store_lmdb::{check_integrity, LmdbEnvironment, LmdbLedger};
#[cfg(test)]
use commitvote_store_lmdb::LmdbError;
use commitvote_types::{Commitment, CommitmentScheme, Secret};
use commitvote_utils::LogFormat;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "commitvote", about = "Two-choice commit-reveal voting", version)]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the LMDB ledger.
    #[arg(long, global = true, env = "COMMITVOTE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "COMMITVOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Logs go to stderr.
    #[arg(long, global = true, env = "COMMITVOTE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Print command output as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create the ballot. A ledger holds exactly one.
    Init {
        #[arg(long)]
        choice1: String,
        #[arg(long)]
        choice2: String,
        /// "keccak256" or "blake2b-v1" (defaults to the configured scheme).
        #[arg(long)]
        scheme: Option<CommitmentScheme>,
    },
    /// Commit a hidden vote. Without --secret a random one is generated and printed.
    Vote {
        #[arg(long)]
        choice: String,
        #[arg(long, env = "COMMITVOTE_SECRET", hide_env_values = true)]
        secret: Option<String>,
    },
    /// Reveal a committed vote.
    Reveal {
        #[arg(long)]
        choice: String,
        #[arg(long, env = "COMMITVOTE_SECRET", hide_env_values = true)]
        secret: String,
        #[arg(long)]
        commitment: Commitment,
    },
    /// Show whether a commitment is pending or revealed.
    Status { commitment: Commitment },
    /// List every commitment in the order it was recorded.
    Commits,
    /// Count all votes, pending and revealed.
    Total,
    /// Revealed votes per choice.
    Tally,
    /// The choice with strictly more revealed votes.
    Winner,
    /// Show the ballot's choices.
    Choices,
    /// Check the ledger's internal consistency.
    Check,
    /// Print the effective configuration after file, env and flag overrides.
    Config,
}

/// Merge the config file (if any) with flag and env overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

/// Open the ledger. Only `init` may create one; every other command needs
/// an existing ledger so a mistyped data dir fails instead of reading empty.
fn open_env(config: &CliConfig, create: bool) -> anyhow::Result<LmdbEnvironment> {
    let (dir, max_dbs, map_size) = (&config.data_dir, config.max_dbs, config.map_size);
    let env = if create {
        LmdbEnvironment::open(dir, max_dbs, map_size)
    } else {
        LmdbEnvironment::open_existing(dir, max_dbs, map_size)
    };
    env.with_context(|| format!("opening ledger at {}", dir.display()))
}

fn open_session(env: &LmdbEnvironment) -> anyhow::Result<VotingSession<LmdbLedger>> {
    Ok(VotingSession::open(Arc::new(env.ledger()))?)
}

fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<commands::Output> {
    let session = || -> anyhow::Result<VotingSession<LmdbLedger>> {
        open_session(&open_env(config, false)?)
    };

    let output = match cli.command {
        Command::Init {
            choice1,
            choice2,
            scheme,
        } => commands::init(
            Arc::new(open_env(config, true)?.ledger()),
            &choice1,
            &choice2,
            scheme.unwrap_or(config.scheme),
        )?,
        Command::Vote { choice, secret } => {
            commands::vote(&session()?, &choice, secret.map(Secret::from))?
        }
        Command::Reveal {
            choice,
            secret,
            commitment,
        } => commands::reveal(&session()?, &choice, &Secret::from(secret), &commitment)?,
        Command::Status { commitment } => commands::status(&session()?, &commitment)?,
        Command::Commits => commands::commits(&session()?)?,
        Command::Total => commands::total(&session()?)?,
        Command::Tally => commands::tally(&session()?)?,
        Command::Winner => commands::winner(&session()?)?,
        Command::Choices => commands::choices(&session()?),
        Command::Check => {
            let report = check_integrity(&open_env(config, false)?)?;
            let output = commands::check(&report);
            if !report.is_healthy() {
                println!("{}", output.render(cli.json));
                anyhow::bail!("ledger integrity check found {} problem(s)", report.errors.len());
            }
            output
        }
        Command::Config => commands::config(config)?,
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    commitvote_utils::init_logging(config.log_format, &config.log_level)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "resolved configuration");

    let as_json = cli.json;
    let output = run(cli, &config)?;
    println!("{}", output.render(as_json));
    Ok(())
}
