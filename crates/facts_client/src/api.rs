use url::Url;

use facts_logging::facts_debug;

use crate::{ClientError, ClientSettings, PollResult, SubmissionRequest, SubmitAck};

pub const SUBMIT_PATH: &str = "submit_question_and_documents";
pub const FACTS_PATH: &str = "get_question_and_facts";

/// The two backend endpoints the poll cycle talks to.
#[async_trait::async_trait]
pub trait FactsApi: Send + Sync {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmitAck, ClientError>;

    async fn fetch_facts(&self, task_id: Option<u64>) -> Result<PollResult, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFactsApi {
    client: reqwest::Client,
    submit_url: Url,
    facts_url: Url,
    read_task_id: bool,
}

impl ReqwestFactsApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::Network(err.to_string()))?;
        Ok(Self {
            client,
            submit_url: endpoint(&settings.base_url, SUBMIT_PATH)?,
            facts_url: endpoint(&settings.base_url, FACTS_PATH)?,
            read_task_id: settings.thread_task_id,
        })
    }
}

#[async_trait::async_trait]
impl FactsApi for ReqwestFactsApi {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmitAck, ClientError> {
        facts_debug!(
            "POST {} documents={}",
            self.submit_url,
            request.documents.len()
        );
        let response = self
            .client
            .post(self.submit_url.clone())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        if !self.read_task_id {
            return Ok(SubmitAck::default());
        }
        // An unreadable body does not turn a 2xx into a failure.
        Ok(response
            .bytes()
            .await
            .map(|body| SubmitAck::from_body(&body))
            .unwrap_or_default())
    }

    async fn fetch_facts(&self, task_id: Option<u64>) -> Result<PollResult, ClientError> {
        let mut url = self.facts_url.clone();
        if let Some(task_id) = task_id {
            url.query_pairs_mut()
                .append_pair("task_id", &task_id.to_string());
        }
        facts_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        PollResult::from_body(&body)
    }
}

fn endpoint(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path)
        .map_err(|err| ClientError::InvalidUrl(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout;
    }
    ClientError::Network(err.to_string())
}
