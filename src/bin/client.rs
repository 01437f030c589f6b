//! `sbin`: command-line client for the string bins server.

use std::process::ExitCode;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use stringbins::client::default_base_url;
use stringbins::{cli, telemetry, BinClient, Cli};

#[tokio::main]
pub async fn main() -> ExitCode {
    telemetry::init(LevelFilter::WARN);

    let args = Cli::parse();
    let client = BinClient::new(default_base_url());

    let mut stdout = std::io::stdout().lock();
    cli::run(&args, &client, &mut stdout).await.into()
}
