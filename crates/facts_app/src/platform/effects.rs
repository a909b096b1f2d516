use std::time::Duration;

use facts_client::{ClientEvent, ClientHandle, CycleOutcome, SubmissionRequest};
use facts_core::{Effect, Msg};
use facts_logging::{facts_debug, facts_info, facts_warn};

/// Executes core effects against the client and turns client events back
/// into core messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(client: ClientHandle) -> Self {
        Self { client }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartCycle { session } => {
                    facts_info!(
                        "StartCycle session={} documents={:?}",
                        session.id,
                        session.submission.documents
                    );
                    self.client.start(
                        session.id,
                        SubmissionRequest {
                            question: session.submission.question,
                            documents: session.submission.documents,
                        },
                    );
                }
                Effect::CancelCycle { session } => {
                    facts_info!("CancelCycle session={}", session);
                    self.client.cancel(session);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next client event that maps to a message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.client.recv_timeout(timeout).and_then(map_event)
    }

    pub fn drain_msgs(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.client.try_recv())
            .filter_map(map_event)
            .collect()
    }
}

fn map_event(event: ClientEvent) -> Option<Msg> {
    match event {
        ClientEvent::Submitted { session, task_id } => {
            facts_debug!("Session {} submitted (task_id {:?})", session, task_id);
            Some(Msg::SubmitAccepted { session })
        }
        ClientEvent::Processing { session, attempt } => {
            Some(Msg::PollProcessing { session, attempt })
        }
        ClientEvent::Finished { session, outcome } => match outcome {
            CycleOutcome::Facts(facts) => Some(Msg::FactsReady { session, facts }),
            CycleOutcome::NoFacts { status } => Some(Msg::FactsUnavailable { session, status }),
            CycleOutcome::SubmitFailed(err) => {
                facts_warn!("Session {} submit failed: {}", session, err);
                Some(Msg::SubmitFailed {
                    session,
                    reason: err.to_string(),
                })
            }
            CycleOutcome::PollFailed(err) => {
                facts_warn!("Session {} poll failed: {}", session, err);
                Some(Msg::PollFailed {
                    session,
                    reason: err.to_string(),
                })
            }
            CycleOutcome::Cancelled => {
                facts_debug!("Session {} cancelled", session);
                None
            }
        },
    }
}
