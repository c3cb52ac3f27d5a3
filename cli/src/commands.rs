//! Subcommand bodies. Each returns an [`Output`] that `main` prints in the
//! requested format.

use std::sync::Arc;

use serde_json::{json, Value};

use commitvote_session::VotingSession;
use commitvote_store::{BallotStore, VoteLedger};
use commitvote_store_lmdb::IntegrityReport;
use commitvote_types::{BallotConfig, Choices, Commitment, CommitmentScheme, Secret};

use crate::config::CliConfig;

/// A command result with both renderings.
#[derive(Debug)]
pub struct Output {
    pub human: String,
    pub json: Value,
}

impl Output {
    fn new(human: impl Into<String>, json: Value) -> Self {
        Self {
            human: human.into(),
            json,
        }
    }

    pub fn render(&self, as_json: bool) -> String {
        if as_json {
            self.json.to_string()
        } else {
            self.human.clone()
        }
    }
}

/// A fresh secret for voters who did not bring one.
pub fn generate_secret() -> anyhow::Result<Secret> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| anyhow::anyhow!("failed to gather randomness: {e}"))?;
    Ok(Secret::from_random_bytes(bytes))
}

pub fn init<L: VoteLedger + BallotStore>(
    ledger: Arc<L>,
    first: &str,
    second: &str,
    scheme: CommitmentScheme,
) -> anyhow::Result<Output> {
    let choices = Choices::new(first, second)?;
    let session = VotingSession::initialize(ledger, BallotConfig::new(choices, scheme))?;
    Ok(choices_output(&session, "created ballot"))
}

pub fn choices<L: VoteLedger + BallotStore>(session: &VotingSession<L>) -> Output {
    choices_output(session, "ballot")
}

fn choices_output<L: VoteLedger + BallotStore>(session: &VotingSession<L>, heading: &str) -> Output {
    let choices = session.choices();
    Output::new(
        format!(
            "{heading} ({})\n  1: {}\n  2: {}",
            session.scheme(),
            choices.first(),
            choices.second()
        ),
        json!({
            "choices": [choices.first(), choices.second()],
            "scheme": session.scheme().as_str(),
        }),
    )
}

/// Commit a vote. When `secret` is `None` one is generated and echoed back,
/// since it is needed again to reveal.
pub fn vote<L: VoteLedger + BallotStore>(
    session: &VotingSession<L>,
    label: &str,
    secret: Option<Secret>,
) -> anyhow::Result<Output> {
    let generated = secret.is_none();
    let secret = match secret {
        Some(secret) => secret,
        None => generate_secret()?,
    };
    let commitment = session.vote(label, secret.as_bytes())?;

    let mut human = format!("commitment: {commitment}");
    let mut json = json!({ "commitment": commitment.to_hex(), "status": "Pending" });
    if generated {
        // Generated secrets are hex text, so as_str always succeeds here.
        let text = secret.as_str().unwrap_or_default();
        human.push_str(&format!("\nsecret: {text}\nkeep the secret: it is required to reveal"));
        json["secret"] = Value::from(text);
    }
    Ok(Output::new(human, json))
}

pub fn reveal<L: VoteLedger + BallotStore>(
    session: &VotingSession<L>,
    label: &str,
    secret: &Secret,
    commitment: &Commitment,
) -> anyhow::Result<Output> {
    session.reveal(label, secret.as_bytes(), commitment)?;
    Ok(Output::new(
        format!("revealed {commitment} for {label}"),
        json!({ "commitment": commitment.to_hex(), "choice": label, "status": "Revealed" }),
    ))
}

pub fn status<L: VoteLedger + BallotStore>(
    session: &VotingSession<L>,
    commitment: &Commitment,
) -> anyhow::Result<Output> {
    let status = session.vote_status(commitment)?;
    Ok(Output::new(
        status.as_str(),
        json!({ "commitment": commitment.to_hex(), "status": status.as_str() }),
    ))
}

pub fn commits<L: VoteLedger + BallotStore>(session: &VotingSession<L>) -> anyhow::Result<Output> {
    let commitments: Vec<String> = session
        .list_commitments()?
        .iter()
        .map(Commitment::to_hex)
        .collect();
    Ok(Output::new(commitments.join("\n"), json!(commitments)))
}

pub fn total<L: VoteLedger + BallotStore>(session: &VotingSession<L>) -> anyhow::Result<Output> {
    let total = session.total_votes()?;
    Ok(Output::new(total.to_string(), json!({ "total": total })))
}

pub fn tally<L: VoteLedger + BallotStore>(session: &VotingSession<L>) -> anyhow::Result<Output> {
    let tally = session.tally()?;
    let mut human = String::new();
    for count in &tally.choices {
        human.push_str(&format!("{}: {}\n", count.label, count.revealed));
    }
    human.push_str(&format!("pending: {}\ntotal: {}", tally.pending, tally.total));
    Ok(Output::new(human, serde_json::to_value(&tally)?))
}

pub fn winner<L: VoteLedger + BallotStore>(session: &VotingSession<L>) -> anyhow::Result<Output> {
    let label = session.winner()?;
    Ok(Output::new(label.clone(), json!({ "winner": label })))
}

/// The effective configuration, as TOML for humans.
pub fn config(config: &CliConfig) -> anyhow::Result<Output> {
    Ok(Output::new(
        config.to_toml_string()?.trim_end(),
        serde_json::to_value(config)?,
    ))
}

pub fn check(report: &IntegrityReport) -> Output {
    let mut human = format!(
        "records: {}\nordered: {}\npending: {}\nrevealed: {}",
        report.records, report.ordered, report.pending, report.revealed
    );
    for error in &report.errors {
        human.push_str(&format!("\nerror: {error}"));
    }
    Output::new(
        human,
        json!({
            "healthy": report.is_healthy(),
            "records": report.records,
            "ordered": report.ordered,
            "pending": report.pending,
            "revealed": report.revealed,
            "errors": report.errors,
        }),
    )
}
