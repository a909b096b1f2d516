//! Command-line configuration.
//!
//! Every option can also come from the environment so the client can be
//! pointed at whichever origin serves the backend.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use facts_client::ClientSettings;
use log::LevelFilter;

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "facts")]
#[command(about = "Ask a question about a set of documents and poll for the extracted facts", long_about = None)]
pub struct Cli {
    /// Origin of the facts backend. Only protocol and host are used.
    #[arg(long, env = "FACTS_ORIGIN", default_value = "http://localhost:8000")]
    pub origin: String,

    /// Question to submit; runs once and exits instead of prompting.
    #[arg(long, requires = "documents")]
    pub question: Option<String>,

    /// Comma-separated document identifiers for --question.
    #[arg(long, requires = "question")]
    pub documents: Option<String>,

    /// Delay between a "processing" answer and the next poll.
    #[arg(long, env = "FACTS_POLL_INTERVAL_MS", default_value_t = 1000)]
    pub poll_interval_ms: u64,

    #[arg(long, env = "FACTS_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, env = "FACTS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Pass the submit response's task_id to the facts endpoint.
    #[arg(long, env = "FACTS_THREAD_TASK_ID")]
    pub thread_task_id: bool,

    /// How results are written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Where log records go.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, env = "FACTS_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `- fact` line per fact.
    Text,
    /// An escaped `<ul>` fragment.
    Html,
}

impl Cli {
    pub fn client_settings(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::for_origin(&self.origin)
            .with_context(|| format!("invalid backend origin {:?}", self.origin))?;
        settings.poll_interval = Duration::from_millis(self.poll_interval_ms);
        settings.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs);
        settings.thread_task_id = self.thread_task_id;
        Ok(settings)
    }

    /// The question and raw documents text when running non-interactively.
    pub fn one_shot(&self) -> Option<(String, String)> {
        match (&self.question, &self.documents) {
            (Some(question), Some(documents)) => Some((question.clone(), documents.clone())),
            _ => None,
        }
    }
}
