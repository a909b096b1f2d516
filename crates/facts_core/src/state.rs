use crate::documents::parse_documents;
use crate::view_model::{AppViewModel, ResultsView};

pub type SessionId = u64;

/// The request carried by one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub question: String,
    pub documents: Vec<String>,
}

/// One submit-then-poll cycle, identified so that late events from a
/// superseded cycle can be told apart from the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSession {
    pub id: SessionId,
    pub submission: Submission,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Polling {
        attempts: u32,
    },
    Rendered(Vec<String>),
    /// Terminal: the backend answered with something other than facts.
    Unavailable,
    Failed(String),
}

impl UiState {
    /// True while a cycle is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, UiState::Submitting | UiState::Polling { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UiState::Rendered(_) | UiState::Unavailable | UiState::Failed(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    question_input: String,
    documents_input: String,
    ui: UiState,
    session: Option<SubmissionSession>,
    last_session_id: SessionId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            ui: self.ui.clone(),
            results: ResultsView::from_ui(&self.ui),
            busy: self.ui.is_active(),
            dirty: self.dirty,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn session(&self) -> Option<&SubmissionSession> {
        self.session.as_ref()
    }

    /// Returns the session id if its cycle is still in flight.
    pub fn active_session_id(&self) -> Option<SessionId> {
        if self.ui.is_active() {
            self.session.as_ref().map(|session| session.id)
        } else {
            None
        }
    }

    pub(crate) fn is_current(&self, id: SessionId) -> bool {
        self.active_session_id() == Some(id)
    }

    pub(crate) fn set_question_input(&mut self, text: String) {
        self.question_input = text;
    }

    pub(crate) fn set_documents_input(&mut self, text: String) {
        self.documents_input = text;
    }

    /// Builds a fresh session from the current field contents and moves to
    /// `Submitting`.
    pub(crate) fn begin_session(&mut self) -> SubmissionSession {
        self.last_session_id += 1;
        let session = SubmissionSession {
            id: self.last_session_id,
            submission: Submission {
                question: self.question_input.trim().to_string(),
                documents: parse_documents(&self.documents_input),
            },
        };
        self.session = Some(session.clone());
        self.set_ui(UiState::Submitting);
        session
    }

    pub(crate) fn set_ui(&mut self, ui: UiState) {
        if self.ui != ui {
            self.ui = ui;
            self.mark_dirty();
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
