//! Fact resolver
//!
//! Turns any query string into a complete `CelestialRecord`. The remote
//! generator is preferred while it is configured and not known to be
//! offline. Every failure on that path falls back to local data, so
//! `resolve` has no error type.

use crate::catalog;
use crate::generator;
use crate::prober::Prober;
use crate::schema::{self, SchemaError};
use cosmiclens_core::{CelestialRecord, Config, PlotPosition};
use cosmiclens_llm::{GenerateRequest, GenerativeTransport, TransportError};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
enum RemoteFailure {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    #[error("schema: {0}")]
    Schema(#[from] SchemaError),
}

pub struct FactResolver {
    config: Config,
    transport: Option<Arc<dyn GenerativeTransport>>,
    prober: Arc<Prober>,
}

impl FactResolver {
    pub fn new(config: Config, transport: Option<Arc<dyn GenerativeTransport>>, prober: Arc<Prober>) -> Self {
        Self {
            config,
            transport,
            prober,
        }
    }

    /// Resolve a query. Never fails; simulated answers have `is_simulated` set.
    pub async fn resolve(&self, query: &str) -> CelestialRecord {
        let query = query.trim();

        if let Some(transport) = self.remote_target(query) {
            match self.resolve_remote(&**transport, query).await {
                Ok(record) => return record,
                Err(e) => warn!("Remote lookup for {:?} failed ({}); using simulated record", query, e),
            }
        }

        self.resolve_local(query).await
    }

    /// Local answer only, without touching the transport.
    pub async fn resolve_local(&self, query: &str) -> CelestialRecord {
        let latency = self.config.simulated_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        simulate_lookup(query)
    }

    fn remote_target(&self, query: &str) -> Option<&Arc<dyn GenerativeTransport>> {
        if query.is_empty() || !self.config.is_configured() || self.prober.state().is_offline() {
            return None;
        }
        self.transport.as_ref()
    }

    async fn resolve_remote(
        &self,
        transport: &dyn GenerativeTransport,
        query: &str,
    ) -> Result<CelestialRecord, RemoteFailure> {
        debug!("Remote lookup via {}: {:?}", transport.name(), query);
        let request = GenerateRequest::json(schema::record_prompt(query), schema::record_schema());
        let response = transport.generate(request).await?;
        let record = schema::parse_record(&response.text)?;
        Ok(record)
    }
}

/// Offline lookup order: exact curated name, curated substring, seed catalog
/// substring, then the deterministic generator.
pub fn simulate_lookup(query: &str) -> CelestialRecord {
    let query = query.trim();

    if let Some(entry) = catalog::curated_exact(query) {
        return entry.to_record();
    }
    if let Some(entry) = catalog::curated_partial(query) {
        return entry.to_record();
    }
    if let Some(entry) = catalog::seed_partial(query) {
        return generator::simulate_known(
            entry.name,
            entry.category,
            PlotPosition::clamped(entry.x, entry.y),
            entry.color,
        );
    }
    generator::simulate(query)
}
