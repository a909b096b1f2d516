use crate::UiState;

pub const PROCESSING_TEXT: &str = "Processing...";
pub const NO_FACTS_TEXT: &str = "No facts available or processing not complete";
pub const SUBMIT_FAILED_PREFIX: &str = "Failed to submit documents: ";
pub const FETCH_FAILED_PREFIX: &str = "An error occurred while fetching the facts: ";

/// What the results surface should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Empty,
    Text(String),
    Facts(Vec<String>),
}

impl ResultsView {
    pub(crate) fn from_ui(ui: &UiState) -> Self {
        match ui {
            UiState::Idle => ResultsView::Empty,
            UiState::Submitting | UiState::Polling { .. } => {
                ResultsView::Text(PROCESSING_TEXT.to_string())
            }
            UiState::Rendered(facts) => ResultsView::Facts(facts.clone()),
            UiState::Unavailable => ResultsView::Text(NO_FACTS_TEXT.to_string()),
            UiState::Failed(message) => ResultsView::Text(message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub ui: UiState,
    pub results: ResultsView,
    pub busy: bool,
    pub dirty: bool,
}
