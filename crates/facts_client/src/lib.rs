//! Facts client: HTTP contract, poll cycle and background execution.
mod api;
mod cycle;
mod handle;
mod settings;
mod types;

pub use api::{FactsApi, ReqwestFactsApi, FACTS_PATH, SUBMIT_PATH};
pub use cycle::{run_cycle, ChannelEventSink, EventSink};
pub use handle::ClientHandle;
pub use settings::{base_url_from_origin, ClientSettings, DEFAULT_POLL_INTERVAL};
pub use types::{
    ClientError, ClientEvent, CycleOutcome, PollResult, SessionId, SubmissionRequest, SubmitAck,
};
