use facts_core::{AppViewModel, ResultsView};

/// One change to the results surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    Clear,
    ShowText(String),
    ShowFacts(Vec<String>),
}

pub fn render(view: &AppViewModel) -> Vec<SurfaceCommand> {
    let command = match &view.results {
        ResultsView::Empty => SurfaceCommand::Clear,
        ResultsView::Text(text) => SurfaceCommand::ShowText(text.clone()),
        ResultsView::Facts(facts) => SurfaceCommand::ShowFacts(facts.clone()),
    };
    vec![command]
}

#[cfg(test)]
mod tests {
    use facts_core::{update, AppState, Msg, NO_FACTS_TEXT, PROCESSING_TEXT};
    use pretty_assertions::assert_eq;

    use super::{render, SurfaceCommand};

    fn submitted() -> AppState {
        update(AppState::new(), Msg::SubmitClicked).0
    }

    #[test]
    fn idle_clears_results() {
        assert_eq!(
            render(&AppState::new().view()),
            vec![SurfaceCommand::Clear]
        );
    }

    #[test]
    fn in_flight_shows_processing() {
        assert_eq!(
            render(&submitted().view()),
            vec![SurfaceCommand::ShowText(PROCESSING_TEXT.to_string())]
        );
    }

    #[test]
    fn facts_keep_their_order() {
        let (state, _) = update(submitted(), Msg::SubmitAccepted { session: 1 });
        let (state, _) = update(
            state,
            Msg::FactsReady {
                session: 1,
                facts: vec!["b".to_string(), "a".to_string()],
            },
        );

        assert_eq!(
            render(&state.view()),
            vec![SurfaceCommand::ShowFacts(vec![
                "b".to_string(),
                "a".to_string()
            ])]
        );
    }

    #[test]
    fn unavailable_shows_fallback() {
        let (state, _) = update(submitted(), Msg::SubmitAccepted { session: 1 });
        let (state, _) = update(
            state,
            Msg::FactsUnavailable {
                session: 1,
                status: Some("error".to_string()),
            },
        );

        assert_eq!(
            render(&state.view()),
            vec![SurfaceCommand::ShowText(NO_FACTS_TEXT.to_string())]
        );
    }
}
