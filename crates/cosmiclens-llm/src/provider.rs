//! Generative transport trait

use crate::types::{GenerateRequest, GenerateResponse};
use std::fmt;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Structured failure class reported by a transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    RateLimited,
    Unauthorized,
    NotFound,
    Timeout,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::RateLimited => "rate limited",
            TransportErrorKind::Unauthorized => "unauthorized",
            TransportErrorKind::NotFound => "not found",
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Other => "request failed",
        };
        f.write_str(s)
    }
}

/// Transport error
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::RateLimited, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::NotFound, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(e.to_string())
        } else {
            Self::other(e.to_string())
        }
    }
}

/// A remote text generator that can be asked for JSON shaped by a schema.
#[async_trait::async_trait]
pub trait GenerativeTransport: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    /// Send one request. No retries happen at this layer.
    async fn generate(&self, request: GenerateRequest) -> TransportResult<GenerateResponse>;
}
