//! Cosmic Lens LLM - Generative-text transport seam and adapters

pub mod gemini;
pub mod mock;
pub mod provider;
pub mod types;

pub use gemini::GeminiTransport;
pub use mock::{ScriptedReply, ScriptedTransport};
pub use provider::{GenerativeTransport, TransportError, TransportErrorKind, TransportResult};
pub use types::*;
