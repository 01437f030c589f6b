//! Command-line interface for the bin client.
//!
//! Each method runs to completion and reports an [`Outcome`]; only the binary's
//! `main` turns that into a process exit code.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use crate::client::{BinClient, ClientError};

pub const UUID_IGNORED_MESSAGE: &str = "uuid flag ignored because method is not create";
pub const CONTENT_MISSING_MESSAGE: &str = "no content provided. Specify with -c or --content";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "There was an unexpected error";

/// Store named strings.
#[derive(Parser, Debug)]
#[command(name = "sbin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Whether to create, retrieve, or update the given bin.
    #[arg(value_enum)]
    pub method: Method,

    /// The name of the bin.
    pub name: String,

    /// Append a UUID to the name when creating a new bin.
    #[arg(short, long)]
    pub uuid: bool,

    /// The string to store.
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Operations the client can request.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Create an empty bin.
    Create,
    /// Print the content of a bin.
    Retrieve,
    /// Replace the content of a bin.
    Update,
}

/// How a CLI invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Failures that are not part of a method's normal reporting.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Run one invocation, writing every user-facing line to `out`.
///
/// Unexpected failures are reported here, so the result is always an
/// `Outcome`.
pub async fn run<W: Write>(cli: &Cli, client: &BinClient, out: &mut W) -> Outcome {
    match dispatch(cli, client, out).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!(error = ?e, "unexpected failure");
            let _ = writeln!(out, "{}", UNEXPECTED_ERROR_MESSAGE);
            let _ = writeln!(out, "{}", e);
            Outcome::Failure
        }
    }
}

async fn dispatch<W: Write>(
    cli: &Cli,
    client: &BinClient,
    out: &mut W,
) -> Result<Outcome, CliError> {
    if cli.method != Method::Create && cli.uuid {
        writeln!(out, "{}", UUID_IGNORED_MESSAGE)?;
    }

    match cli.method {
        Method::Create => create(client, &cli.name, cli.uuid, out).await,
        Method::Retrieve => retrieve(client, &cli.name, out).await,
        Method::Update => match &cli.content {
            Some(content) => update(client, &cli.name, content, out).await,
            None => {
                writeln!(out, "{}", CONTENT_MISSING_MESSAGE)?;
                Ok(Outcome::Failure)
            }
        },
    }
}

async fn create<W: Write>(
    client: &BinClient,
    name: &str,
    uuid: bool,
    out: &mut W,
) -> Result<Outcome, CliError> {
    match client.create(name, uuid).await {
        Ok(bin_name) => {
            writeln!(out, "Created bin with name:{}", bin_name)?;
            Ok(Outcome::Success)
        }
        Err(e) => report_failure(e, out, |detail| {
            format!("Failed to create bin {}: {}", name, detail)
        }),
    }
}

async fn retrieve<W: Write>(
    client: &BinClient,
    name: &str,
    out: &mut W,
) -> Result<Outcome, CliError> {
    match client.retrieve(name).await {
        Ok(content) => {
            writeln!(out, "{}", content)?;
            Ok(Outcome::Success)
        }
        Err(e) => report_failure(e, out, |detail| {
            format!("Failed to retrieve bin {}: {}", name, detail)
        }),
    }
}

async fn update<W: Write>(
    client: &BinClient,
    name: &str,
    content: &str,
    out: &mut W,
) -> Result<Outcome, CliError> {
    match client.update(name, content).await {
        Ok(()) => {
            writeln!(out, "Updated bin {}", name)?;
            Ok(Outcome::Success)
        }
        Err(e) => report_failure(e, out, |detail| {
            format!("Failed to update {}: {}", name, detail)
        }),
    }
}

/// Print the message for an expected failure; hand anything else back up.
fn report_failure<W, F>(
    err: ClientError,
    out: &mut W,
    server_message: F,
) -> Result<Outcome, CliError>
where
    W: Write,
    F: FnOnce(&str) -> String,
{
    match err {
        ClientError::Server { detail, .. } => {
            writeln!(out, "{}", server_message(&detail))?;
            Ok(Outcome::Failure)
        }
        ClientError::Connection(e) => {
            tracing::debug!(error = %e, "connection failed");
            writeln!(out, "{}", CONNECTION_ERROR_MESSAGE)?;
            Ok(Outcome::Failure)
        }
        other => Err(other.into()),
    }
}
