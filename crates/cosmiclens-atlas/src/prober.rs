//! Connectivity prober
//!
//! Decides once per session whether the remote generator is usable and
//! reduces every failure to a `ReasonCode`. The first result is cached;
//! `reprobe` replaces it on demand.

use cosmiclens_core::{Config, ConnectionResult, ConnectivityState, ReasonCode};
use cosmiclens_llm::{GenerateRequest, GenerativeTransport, TransportErrorKind};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

const PING_PROMPT: &str = "Reply with the single word: pong";

pub struct Prober {
    config: Config,
    transport: Option<Arc<dyn GenerativeTransport>>,
    state: RwLock<ConnectivityState>,
    // Serializes probes so concurrent callers share one remote call.
    gate: Mutex<Option<ConnectionResult>>,
}

impl Prober {
    pub fn new(config: Config, transport: Option<Arc<dyn GenerativeTransport>>) -> Self {
        Self {
            config,
            transport,
            state: RwLock::new(ConnectivityState::Unknown),
            gate: Mutex::new(None),
        }
    }

    /// Cached probe: the remote is contacted at most once until `reprobe`.
    pub async fn probe(&self) -> ConnectionResult {
        let mut cached = self.gate.lock().await;
        if let Some(result) = *cached {
            return result;
        }
        let result = self.check().await;
        *cached = Some(result);
        self.set_state(result.into());
        result
    }

    /// Discard the cached result and probe again.
    pub async fn reprobe(&self) -> ConnectionResult {
        let mut cached = self.gate.lock().await;
        let result = self.check().await;
        *cached = Some(result);
        self.set_state(result.into());
        result
    }

    /// Last known state without waiting on an in-flight probe.
    pub fn state(&self) -> ConnectivityState {
        match self.state.read() {
            Ok(s) => *s,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Credential present and a transport to use it with.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured() && self.transport.is_some()
    }

    fn set_state(&self, next: ConnectivityState) {
        match self.state.write() {
            Ok(mut s) => *s = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    async fn check(&self) -> ConnectionResult {
        let transport = match (&self.transport, self.config.is_configured()) {
            (Some(t), true) => t,
            _ => {
                info!("No API key configured; connectivity {}", ReasonCode::KeyMissing);
                return ConnectionResult::failed(ReasonCode::KeyMissing);
            }
        };

        debug!("Probing {} ({})", transport.name(), transport.model());
        let ping = GenerateRequest::text(PING_PROMPT)
            .with_max_output_tokens(8)
            .with_temperature(0.0);
        match transport.generate(ping).await {
            Ok(_) => {
                info!("Connectivity probe succeeded");
                ConnectionResult::online()
            }
            Err(e) => {
                let code = reason_for(e.kind);
                info!("Connectivity probe failed: {} -> {}", e, code);
                ConnectionResult::failed(code)
            }
        }
    }
}

/// Map a structured transport failure to the status surfaced to the UI.
pub fn reason_for(kind: TransportErrorKind) -> ReasonCode {
    match kind {
        TransportErrorKind::RateLimited => ReasonCode::QuotaExceeded,
        TransportErrorKind::Unauthorized => ReasonCode::KeyRejected,
        TransportErrorKind::NotFound => ReasonCode::ModelError,
        TransportErrorKind::Timeout | TransportErrorKind::Other => ReasonCode::ConnectionFailed,
    }
}
