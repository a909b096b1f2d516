use facts_logging::{facts_debug, facts_info};

use crate::view_model::{FETCH_FAILED_PREFIX, SUBMIT_FAILED_PREFIX};
use crate::{AppState, Effect, Msg, SessionId, UiState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuestionChanged(text) => {
            state.set_question_input(text);
            Vec::new()
        }
        Msg::DocumentsChanged(text) => {
            state.set_documents_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // At most one cycle: a resubmission supersedes the active one.
            let mut effects = Vec::with_capacity(2);
            if let Some(previous) = state.active_session_id() {
                facts_info!("Session {} superseded by a new submission", previous);
                effects.push(Effect::CancelCycle { session: previous });
            }
            let session = state.begin_session();
            facts_info!(
                "Session {} submitting question_len={} documents={}",
                session.id,
                session.submission.question.len(),
                session.submission.documents.len()
            );
            effects.push(Effect::StartCycle { session });
            effects
        }
        Msg::SubmitAccepted { session } => {
            if accept(&state, session, "SubmitAccepted") && *state.ui() == UiState::Submitting {
                state.set_ui(UiState::Polling { attempts: 0 });
            }
            Vec::new()
        }
        Msg::PollProcessing { session, attempt } => {
            if accept(&state, session, "PollProcessing") {
                state.set_ui(UiState::Polling { attempts: attempt });
            }
            Vec::new()
        }
        Msg::FactsReady { session, facts } => {
            if accept(&state, session, "FactsReady") {
                facts_info!("Session {} rendered {} fact(s)", session, facts.len());
                state.set_ui(UiState::Rendered(facts));
            }
            Vec::new()
        }
        Msg::FactsUnavailable { session, status } => {
            if accept(&state, session, "FactsUnavailable") {
                facts_info!("Session {} ended without facts (status {:?})", session, status);
                state.set_ui(UiState::Unavailable);
            }
            Vec::new()
        }
        Msg::SubmitFailed { session, reason } => {
            if accept(&state, session, "SubmitFailed") {
                state.set_ui(UiState::Failed(format!("{SUBMIT_FAILED_PREFIX}{reason}")));
            }
            Vec::new()
        }
        Msg::PollFailed { session, reason } => {
            if accept(&state, session, "PollFailed") {
                state.set_ui(UiState::Failed(format!("{FETCH_FAILED_PREFIX}{reason}")));
            }
            Vec::new()
        }
        Msg::TeardownRequested => match state.active_session_id() {
            Some(active) => {
                state.set_ui(UiState::Idle);
                vec![Effect::CancelCycle { session: active }]
            }
            None => Vec::new(),
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn accept(state: &AppState, session: SessionId, what: &str) -> bool {
    let current = state.is_current(session);
    if !current {
        facts_debug!("Ignoring {} for stale session {}", what, session);
    }
    current
}
