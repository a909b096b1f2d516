use crate::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question field.
    QuestionChanged(String),
    /// User edited the comma-separated documents field.
    DocumentsChanged(String),
    /// User triggered a submission with the current field contents.
    SubmitClicked,
    /// Backend accepted the submission; polling has begun.
    SubmitAccepted { session: SessionId },
    /// A poll answered "processing"; another poll is scheduled.
    PollProcessing { session: SessionId, attempt: u32 },
    /// A poll answered "done" with facts.
    FactsReady {
        session: SessionId,
        facts: Vec<String>,
    },
    /// A poll answered with an unrecognized status or without facts.
    FactsUnavailable {
        session: SessionId,
        status: Option<String>,
    },
    /// Submission failed (HTTP status or transport).
    SubmitFailed { session: SessionId, reason: String },
    /// A poll failed (HTTP status, transport or unreadable body).
    PollFailed { session: SessionId, reason: String },
    /// The UI is going away; stop any active cycle.
    TeardownRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
