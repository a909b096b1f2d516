use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub type SessionId = u64;

/// Body of `POST /submit_question_and_documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub question: String,
    pub documents: Vec<String>,
}

/// What the client keeps from a successful submission. Only the status code
/// decides success; the body is read opportunistically for a task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitAck {
    pub task_id: Option<u64>,
}

impl SubmitAck {
    pub fn from_body(body: &[u8]) -> Self {
        let task_id = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| value.get("task_id").and_then(Value::as_u64));
        Self { task_id }
    }
}

/// Body of `GET /get_question_and_facts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    Processing,
    Done { facts: Vec<String> },
    /// Any other status, a missing status, or "done" without a facts array.
    Other { status: Option<String> },
}

impl PollResult {
    pub fn from_body(body: &[u8]) -> Result<Self, ClientError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        Ok(Self::from_json(&value))
    }

    pub fn from_json(value: &Value) -> Self {
        let status = value.get("status");
        match status.and_then(Value::as_str) {
            Some("processing") => PollResult::Processing,
            Some("done") => match value.get("facts").and_then(Value::as_array) {
                Some(items) => PollResult::Done {
                    facts: items.iter().map(fact_text).collect(),
                },
                None => PollResult::Other {
                    status: Some("done".to_string()),
                },
            },
            Some(other) => PollResult::Other {
                status: Some(other.to_string()),
            },
            None => PollResult::Other {
                status: status.filter(|v| !v.is_null()).map(Value::to_string),
            },
        }
    }
}

fn fact_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),
    #[error("{0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("failed to start client runtime: {0}")]
    Runtime(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Submission succeeded; polling starts.
    Submitted {
        session: SessionId,
        task_id: Option<u64>,
    },
    /// Poll number `attempt` answered "processing".
    Processing { session: SessionId, attempt: u32 },
    Finished {
        session: SessionId,
        outcome: CycleOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Facts(Vec<String>),
    NoFacts { status: Option<String> },
    SubmitFailed(ClientError),
    PollFailed(ClientError),
    Cancelled,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ClientError, PollResult, SubmissionRequest, SubmitAck};

    #[test]
    fn request_serializes_in_field_order() {
        let request = SubmissionRequest {
            question: "Q".to_string(),
            documents: vec!["d1".to_string(), "d2".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"question":"Q","documents":["d1","d2"]}"#
        );
    }

    #[test]
    fn done_with_facts() {
        let result = PollResult::from_json(&json!({"status": "done", "facts": ["f1", "f2"]}));
        assert_eq!(
            result,
            PollResult::Done {
                facts: vec!["f1".to_string(), "f2".to_string()]
            }
        );
    }

    #[test]
    fn done_with_empty_facts_is_still_done() {
        let result = PollResult::from_json(&json!({"status": "done", "facts": []}));
        assert_eq!(result, PollResult::Done { facts: Vec::new() });
    }

    #[test]
    fn done_without_facts_fails_closed() {
        for body in [
            json!({"status": "done"}),
            json!({"status": "done", "facts": null}),
            json!({"status": "done", "facts": "f1"}),
        ] {
            assert_eq!(
                PollResult::from_json(&body),
                PollResult::Other {
                    status: Some("done".to_string())
                }
            );
        }
    }

    #[test]
    fn processing_ignores_extra_fields() {
        let result =
            PollResult::from_json(&json!({"status": "processing", "message": "Task still processing"}));
        assert_eq!(result, PollResult::Processing);
    }

    #[test]
    fn unknown_and_missing_status() {
        assert_eq!(
            PollResult::from_json(&json!({"status": "unknown"})),
            PollResult::Other {
                status: Some("unknown".to_string())
            }
        );
        assert_eq!(
            PollResult::from_json(&json!({"message": "Task not found"})),
            PollResult::Other { status: None }
        );
        assert_eq!(
            PollResult::from_json(&json!([1, 2])),
            PollResult::Other { status: None }
        );
        assert_eq!(
            PollResult::from_json(&json!({"status": 7})),
            PollResult::Other {
                status: Some("7".to_string())
            }
        );
    }

    #[test]
    fn non_string_facts_use_json_text() {
        let result = PollResult::from_json(&json!({"status": "done", "facts": ["a", 1, null]}));
        assert_eq!(
            result,
            PollResult::Done {
                facts: vec!["a".to_string(), "1".to_string(), "null".to_string()]
            }
        );
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = PollResult::from_body(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn submit_ack_reads_task_id_when_present() {
        assert_eq!(
            SubmitAck::from_body(br#"{"message":"Processing started","task_id":3}"#).task_id,
            Some(3)
        );
        assert_eq!(SubmitAck::from_body(b"").task_id, None);
        assert_eq!(SubmitAck::from_body(br#"{"task_id":"x"}"#).task_id, None);
    }

    #[test]
    fn http_error_text_matches_ui_template() {
        assert_eq!(ClientError::HttpStatus(500).to_string(), "HTTP error! status: 500");
    }
}
