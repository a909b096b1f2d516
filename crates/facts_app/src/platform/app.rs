use std::io;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};

use anyhow::{Context, Result};
use facts_client::ClientHandle;
use facts_core::{update, AppState, AppViewModel, Msg, UiState};
use facts_logging::{facts_debug, facts_error, facts_info};

use super::config::Cli;
use super::effects::EffectRunner;
use super::input::{spawn_prompt_reader, submission_msgs};
use super::ui;
use super::ui::surface::{ResultsSurface, TerminalSurface};

pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let settings = cli.client_settings()?;
    facts_info!("Backend base URL {}", settings.base_url);
    let client = ClientHandle::new(settings).context("failed to start the facts client")?;
    let surface = Box::new(TerminalSurface::new(io::stdout(), cli.format));
    let mut app = App::new(EffectRunner::new(client), surface);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    match cli.one_shot() {
        Some((question, documents)) => {
            // No interactive input: the inbox closes immediately and the
            // loop ends once this submission settles.
            drop(msg_tx);
            for msg in submission_msgs(question, documents) {
                app.dispatch(msg);
            }
        }
        None => {
            let (ready_tx, ready_rx) = mpsc::channel();
            app.notify_settled(ready_tx);
            spawn_prompt_reader(msg_tx, ready_rx);
        }
    }

    Ok(app.run(msg_rx))
}

struct App {
    state: AppState,
    runner: EffectRunner,
    surface: Box<dyn ResultsSurface>,
    settled_tx: Option<mpsc::Sender<()>>,
}

impl App {
    fn new(runner: EffectRunner, surface: Box<dyn ResultsSurface>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            surface,
            settled_tx: None,
        }
    }

    /// Signals `settled_tx` each time an in-flight cycle reaches a terminal
    /// state, after its result has been rendered.
    fn notify_settled(&mut self, settled_tx: mpsc::Sender<()>) {
        self.settled_tx = Some(settled_tx);
    }

    fn run(mut self, inbox: mpsc::Receiver<Msg>) -> ExitCode {
        self.pump(&inbox);
        self.exit_code()
    }

    /// Dispatches input and client messages until the input side has closed
    /// and no cycle is in flight.
    fn pump(&mut self, inbox: &mpsc::Receiver<Msg>) {
        let mut input_open = true;
        loop {
            if input_open {
                match inbox.recv_timeout(ui::constants::TICK_INTERVAL) {
                    Ok(msg) => self.dispatch(msg),
                    Err(RecvTimeoutError::Timeout) => self.dispatch(Msg::Tick),
                    Err(RecvTimeoutError::Disconnected) => {
                        facts_debug!("Input closed");
                        input_open = false;
                    }
                }
            } else if let Some(msg) = self.runner.next_msg(ui::constants::TICK_INTERVAL) {
                self.dispatch(msg);
            }

            for msg in self.runner.drain_msgs() {
                self.dispatch(msg);
            }

            if !input_open && !self.state.ui().is_active() {
                break;
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let was_active = self.state.ui().is_active();
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let view = if state.consume_dirty() {
            Some(state.view())
        } else {
            None
        };
        self.state = state;

        if let Some(view) = view {
            self.render(&view);
        }

        if was_active && !self.state.ui().is_active() {
            if let Some(settled_tx) = &self.settled_tx {
                let _ = settled_tx.send(());
            }
        }
    }

    fn render(&mut self, view: &AppViewModel) {
        for command in ui::render::render(view) {
            if let Err(err) = self.surface.apply(command) {
                facts_error!("Failed to write results: {}", err);
            }
        }
    }

    fn exit_code(&self) -> ExitCode {
        match self.state.ui() {
            UiState::Failed(_) => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc, Mutex};
    use std::time::Duration;

    use facts_client::{
        base_url_from_origin, ClientError, ClientHandle, ClientSettings, FactsApi, PollResult,
        SubmissionRequest, SubmitAck,
    };
    use facts_core::{Msg, UiState};
    use pretty_assertions::assert_eq;

    use super::App;
    use crate::platform::effects::EffectRunner;
    use crate::platform::input::submission_msgs;
    use crate::platform::ui::render::SurfaceCommand;
    use crate::platform::ui::surface::ResultsSurface;

    #[derive(Clone, Default)]
    struct RecordingSurface {
        commands: Arc<Mutex<Vec<SurfaceCommand>>>,
    }

    impl ResultsSurface for RecordingSurface {
        fn apply(&mut self, command: SurfaceCommand) -> std::io::Result<()> {
            self.commands.lock().unwrap().push(command);
            Ok(())
        }
    }

    struct ScriptedApi {
        submit_status: Option<u16>,
        answers: Mutex<Vec<PollResult>>,
        polls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(submit_status: Option<u16>, answers: Vec<PollResult>) -> Self {
            Self {
                submit_status,
                answers: Mutex::new(answers),
                polls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl FactsApi for ScriptedApi {
        async fn submit(&self, _request: &SubmissionRequest) -> Result<SubmitAck, ClientError> {
            match self.submit_status {
                Some(status) => Err(ClientError::HttpStatus(status)),
                None => Ok(SubmitAck::default()),
            }
        }

        async fn fetch_facts(&self, _task_id: Option<u64>) -> Result<PollResult, ClientError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            let mut answers = self.answers.lock().unwrap();
            if answers.len() > 1 {
                Ok(answers.remove(0))
            } else {
                Ok(answers[0].clone())
            }
        }
    }

    fn run_one_shot(api: Arc<ScriptedApi>) -> (Vec<SurfaceCommand>, UiState) {
        let (commands, ui, _) = run_one_shot_with_settled(api);
        (commands, ui)
    }

    fn run_one_shot_with_settled(
        api: Arc<ScriptedApi>,
    ) -> (Vec<SurfaceCommand>, UiState, mpsc::Receiver<()>) {
        facts_logging::initialize_for_tests();
        let settings = ClientSettings {
            poll_interval: Duration::from_millis(10),
            ..ClientSettings::new(base_url_from_origin("http://localhost:8000").unwrap())
        };
        let client = ClientHandle::with_api(api, settings).unwrap();
        let surface = RecordingSurface::default();
        let mut app = App::new(EffectRunner::new(client), Box::new(surface.clone()));
        let (settled_tx, settled_rx) = mpsc::channel();
        app.notify_settled(settled_tx);

        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        drop(msg_tx);
        for msg in submission_msgs("Q".to_string(), "d1, d2".to_string()) {
            app.dispatch(msg);
        }
        app.pump(&msg_rx);
        let state = app.state.ui().clone();
        let commands = surface.commands.lock().unwrap().clone();
        (commands, state, settled_rx)
    }

    #[test]
    fn processing_then_facts_renders_list() {
        let api = Arc::new(ScriptedApi::new(
            None,
            vec![
                PollResult::Processing,
                PollResult::Done {
                    facts: vec!["f1".to_string(), "f2".to_string()],
                },
            ],
        ));
        let (commands, ui) = run_one_shot(api.clone());

        assert_eq!(ui, UiState::Rendered(vec!["f1".to_string(), "f2".to_string()]));
        assert_eq!(
            commands.first(),
            Some(&SurfaceCommand::ShowText("Processing...".to_string()))
        );
        assert_eq!(
            commands.last(),
            Some(&SurfaceCommand::ShowFacts(vec![
                "f1".to_string(),
                "f2".to_string()
            ]))
        );
        assert_eq!(api.polls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn submit_failure_renders_message_without_polling() {
        let api = Arc::new(ScriptedApi::new(Some(500), vec![PollResult::Processing]));
        let (commands, ui) = run_one_shot(api.clone());

        assert_eq!(
            ui,
            UiState::Failed("Failed to submit documents: HTTP error! status: 500".to_string())
        );
        assert_eq!(
            commands.last(),
            Some(&SurfaceCommand::ShowText(
                "Failed to submit documents: HTTP error! status: 500".to_string()
            ))
        );
        assert_eq!(api.polls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unknown_status_renders_fallback() {
        let api = Arc::new(ScriptedApi::new(
            None,
            vec![PollResult::Other {
                status: Some("unknown".to_string()),
            }],
        ));
        let (commands, ui) = run_one_shot(api.clone());

        assert_eq!(ui, UiState::Unavailable);
        assert_eq!(
            commands.last(),
            Some(&SurfaceCommand::ShowText(
                "No facts available or processing not complete".to_string()
            ))
        );
        assert_eq!(api.polls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn settled_signal_follows_the_rendered_result() {
        let api = Arc::new(ScriptedApi::new(
            None,
            vec![PollResult::Done {
                facts: vec!["f1".to_string()],
            }],
        ));
        let (commands, ui, settled_rx) = run_one_shot_with_settled(api);

        assert_eq!(ui, UiState::Rendered(vec!["f1".to_string()]));
        assert_eq!(
            commands.last(),
            Some(&SurfaceCommand::ShowFacts(vec!["f1".to_string()]))
        );
        assert_eq!(settled_rx.try_recv(), Ok(()));
        assert!(settled_rx.try_recv().is_err());
    }

    #[test]
    fn submit_failure_also_signals_settled() {
        let api = Arc::new(ScriptedApi::new(Some(503), vec![PollResult::Processing]));
        let (_commands, _ui, settled_rx) = run_one_shot_with_settled(api);

        assert_eq!(settled_rx.try_recv(), Ok(()));
        assert!(settled_rx.try_recv().is_err());
    }
}
