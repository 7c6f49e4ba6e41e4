//! ScriptedTransport: deterministic transport replies for testing
//!
//! Implements GenerativeTransport with canned replies so resolver, prober and
//! seed paths can be exercised without a network. Every call is recorded.

use crate::provider::{GenerativeTransport, TransportError, TransportErrorKind, TransportResult};
use crate::types::{GenerateRequest, GenerateResponse};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;

/// Canned reply configuration
#[derive(Clone, Debug)]
pub enum ScriptedReply {
    /// Reply with this JSON value serialized as text
    Json(Value),
    /// Reply with raw text (use for malformed payloads)
    Text(String),
    /// Fail with a transport error
    Fail(TransportErrorKind, String),
    /// Sleep, then produce the inner reply
    Delayed(Duration, Box<ScriptedReply>),
}

impl ScriptedReply {
    pub fn fail(kind: TransportErrorKind) -> Self {
        ScriptedReply::Fail(kind, format!("scripted {}", kind))
    }

    pub fn delayed(delay: Duration, reply: ScriptedReply) -> Self {
        ScriptedReply::Delayed(delay, Box::new(reply))
    }
}

/// A sequence of replies. Each call to generate pops the next one.
/// When the sequence is exhausted the default reply is used.
pub struct ScriptedTransport {
    replies: Mutex<Vec<ScriptedReply>>,
    default_reply: ScriptedReply,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedTransport {
    /// Always produce the same reply
    pub fn constant(reply: ScriptedReply) -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            default_reply: reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Produce replies in order, then fail with `Other`
    pub fn sequence(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            default_reply: ScriptedReply::Fail(TransportErrorKind::Other, "(scripted: sequence exhausted)".into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of generate calls made so far
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Copies of every request received, oldest first
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self) -> ScriptedReply {
        let mut replies = self.replies.lock().await;
        if replies.is_empty() {
            self.default_reply.clone()
        } else {
            replies.remove(0)
        }
    }
}

#[async_trait::async_trait]
impl GenerativeTransport for ScriptedTransport {
    fn name(&self) -> &str { "scripted" }

    fn model(&self) -> &str { "scripted-model" }

    async fn generate(&self, request: GenerateRequest) -> TransportResult<GenerateResponse> {
        self.requests.lock().await.push(request);
        let mut reply = self.next_reply().await;
        loop {
            match reply {
                ScriptedReply::Json(value) => return Ok(GenerateResponse::new(value.to_string())),
                ScriptedReply::Text(text) => return Ok(GenerateResponse::new(text)),
                ScriptedReply::Fail(kind, message) => return Err(TransportError::new(kind, message)),
                ScriptedReply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
            }
        }
    }
}
