use crate::{SessionId, SubmissionSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit the session's request and poll until a terminal status.
    StartCycle { session: SubmissionSession },
    /// Stop the cycle for a session that is no longer current.
    CancelCycle { session: SessionId },
}
