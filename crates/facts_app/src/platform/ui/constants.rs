use std::time::Duration;

pub const QUESTION_PROMPT: &str = "Question: ";
pub const DOCUMENTS_PROMPT: &str = "Documents (comma-separated): ";
pub const QUIT_COMMAND: &str = ":quit";

/// How long the dispatch loop waits for input before ticking.
pub const TICK_INTERVAL: Duration = Duration::from_millis(75);
