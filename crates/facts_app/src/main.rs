//! Facts poller terminal client.
//!
//! Submits a question and a list of documents to the facts backend and polls
//! until the extracted facts are ready.

mod platform;

use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = platform::config::Cli::parse();
    platform::logging::initialize(cli.log, cli.log_level);
    platform::run_app(cli)
}
