//! String bins server.
//!
//! Serves the bin store over HTTP on the fixed default address and root.

use std::process::ExitCode;

use tracing::level_filters::LevelFilter;

use stringbins::{server, telemetry, ServerConfig};

#[tokio::main]
pub async fn main() -> ExitCode {
    telemetry::init(LevelFilter::INFO);

    match server::run(ServerConfig::default()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
