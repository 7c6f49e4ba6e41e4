//! Initial point population
//!
//! Asks the remote generator for a varied set of objects, bounded by the
//! configured seed timeout. Any failure, an empty answer, or a timeout yields
//! the local seed catalog, so startup never waits indefinitely.

use crate::catalog;
use crate::prober::Prober;
use crate::schema;
use cosmiclens_core::{Config, PlotPoint};
use cosmiclens_llm::{GenerateRequest, GenerativeTransport};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SeedFetcher {
    config: Config,
    transport: Option<Arc<dyn GenerativeTransport>>,
    prober: Arc<Prober>,
}

impl SeedFetcher {
    pub fn new(config: Config, transport: Option<Arc<dyn GenerativeTransport>>, prober: Arc<Prober>) -> Self {
        Self {
            config,
            transport,
            prober,
        }
    }

    pub async fn fetch(&self) -> Vec<PlotPoint> {
        let transport = match &self.transport {
            Some(t) if self.config.is_configured() && !self.prober.state().is_offline() => t,
            _ => {
                debug!("Using local seed catalog");
                return catalog::seed_points();
            }
        };

        let request = GenerateRequest::json(
            schema::nodes_prompt(self.config.seed_count),
            schema::nodes_schema(),
        );
        let outcome = tokio::time::timeout(self.config.seed_timeout(), transport.generate(request)).await;

        let response = match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Seed fetch failed ({}); using local seed catalog", e);
                return catalog::seed_points();
            }
            Err(_) => {
                warn!(
                    "Seed fetch exceeded {}ms; using local seed catalog",
                    self.config.seed_timeout_ms
                );
                return catalog::seed_points();
            }
        };

        match schema::parse_nodes(&response.text) {
            Ok(points) if !points.is_empty() => {
                info!("Seeded {} points from {}", points.len(), transport.name());
                points
            }
            Ok(_) => {
                warn!("Seed fetch returned no usable points; using local seed catalog");
                catalog::seed_points()
            }
            Err(e) => {
                warn!("Seed response rejected ({}); using local seed catalog", e);
                catalog::seed_points()
            }
        }
    }
}
