//! Facts core: pure submit-then-poll state machine and view-model helpers.
mod documents;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use documents::parse_documents;
pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, SessionId, Submission, SubmissionSession, UiState};
pub use update::update;
pub use view_model::{
    AppViewModel, ResultsView, FETCH_FAILED_PREFIX, NO_FACTS_TEXT, PROCESSING_TEXT,
    SUBMIT_FAILED_PREFIX,
};
