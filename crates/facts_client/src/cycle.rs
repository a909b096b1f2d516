use std::sync::mpsc;

use facts_logging::{facts_debug, facts_warn};
use tokio_util::sync::CancellationToken;

use crate::{
    ClientEvent, ClientSettings, CycleOutcome, FactsApi, PollResult, SessionId, SubmissionRequest,
};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Submits `request`, then polls until the backend reports a terminal status.
///
/// Polls are strictly sequential: the next one is scheduled
/// `settings.poll_interval` after the previous response arrived. `cancel` is
/// checked around every request and raced against the delay, so a cancelled
/// cycle issues no further requests. The terminal outcome is returned rather
/// than emitted; intermediate progress goes to `sink`.
pub async fn run_cycle(
    api: &dyn FactsApi,
    session: SessionId,
    request: &SubmissionRequest,
    settings: &ClientSettings,
    cancel: &CancellationToken,
    sink: &dyn EventSink,
) -> CycleOutcome {
    if cancel.is_cancelled() {
        return CycleOutcome::Cancelled;
    }

    let ack = match api.submit(request).await {
        Ok(ack) => ack,
        Err(err) => {
            facts_warn!("Session {} submit failed: {}", session, err);
            return CycleOutcome::SubmitFailed(err);
        }
    };
    if cancel.is_cancelled() {
        return CycleOutcome::Cancelled;
    }

    let task_id = ack.task_id.filter(|_| settings.thread_task_id);
    sink.emit(ClientEvent::Submitted { session, task_id });

    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        let result = api.fetch_facts(task_id).await;
        if cancel.is_cancelled() {
            return CycleOutcome::Cancelled;
        }

        match result {
            Err(err) => {
                facts_warn!("Session {} poll {} failed: {}", session, attempt, err);
                return CycleOutcome::PollFailed(err);
            }
            Ok(PollResult::Done { facts }) => return CycleOutcome::Facts(facts),
            Ok(PollResult::Other { status }) => return CycleOutcome::NoFacts { status },
            Ok(PollResult::Processing) => {
                facts_debug!("Session {} poll {} still processing", session, attempt);
                sink.emit(ClientEvent::Processing { session, attempt });
                tokio::select! {
                    _ = cancel.cancelled() => return CycleOutcome::Cancelled,
                    _ = tokio::time::sleep(settings.poll_interval) => {}
                }
            }
        }
    }
}
