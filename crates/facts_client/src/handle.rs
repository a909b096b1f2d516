use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use facts_logging::{facts_debug, facts_info};
use tokio_util::sync::CancellationToken;

use crate::cycle::{run_cycle, ChannelEventSink};
use crate::{
    ClientError, ClientEvent, ClientSettings, FactsApi, ReqwestFactsApi, SessionId,
    SubmissionRequest,
};

enum ClientCommand {
    Start {
        session: SessionId,
        request: SubmissionRequest,
    },
    Cancel {
        session: SessionId,
    },
}

/// Runs poll cycles on a background tokio runtime.
///
/// At most one cycle is live: starting a session cancels whichever cycle was
/// running before it. Dropping the handle stops the worker and every cycle.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let api = Arc::new(ReqwestFactsApi::new(&settings)?);
        Self::with_api(api, settings)
    }

    pub fn with_api(api: Arc<dyn FactsApi>, settings: ClientSettings) -> Result<Self, ClientError> {
        let runtime =
            tokio::runtime::Runtime::new().map_err(|err| ClientError::Runtime(err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let settings = Arc::new(settings);

        thread::spawn(move || {
            let mut active: Option<(SessionId, CancellationToken)> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Start { session, request } => {
                        if let Some((previous, token)) = active.take() {
                            facts_debug!("Cancelling session {} for session {}", previous, session);
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        active = Some((session, token.clone()));

                        let api = api.clone();
                        let settings = settings.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let sink = ChannelEventSink::new(event_tx.clone());
                            let outcome = run_cycle(
                                api.as_ref(),
                                session,
                                &request,
                                &settings,
                                &token,
                                &sink,
                            )
                            .await;
                            let _ = event_tx.send(ClientEvent::Finished { session, outcome });
                        });
                    }
                    ClientCommand::Cancel { session } => match active.take() {
                        Some((id, token)) if id == session => {
                            facts_info!("Cancelling session {}", session);
                            token.cancel();
                        }
                        other => active = other,
                    },
                }
            }
            if let Some((_, token)) = active {
                token.cancel();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start(&self, session: SessionId, request: SubmissionRequest) {
        let _ = self.cmd_tx.send(ClientCommand::Start { session, request });
    }

    pub fn cancel(&self, session: SessionId) {
        let _ = self.cmd_tx.send(ClientCommand::Cancel { session });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
