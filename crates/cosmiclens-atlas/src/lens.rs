//! One session: prober, resolver, seed fetcher and the accumulated point set.
//!
//! All methods take `&self`, so a session can sit in an `Arc` and serve
//! overlapping lookups. Point-set mutation is serialized by a mutex, and a
//! stale lookup that finishes late still merges its point.

use crate::accumulator::{Accumulator, PointSetPhase};
use crate::prober::Prober;
use crate::resolver::FactResolver;
use crate::seed::SeedFetcher;
use cosmiclens_core::{CelestialRecord, Config, ConnectionResult, ConnectivityState, PlotPoint};
use cosmiclens_llm::{GeminiTransport, GenerativeTransport};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct CosmicLens {
    prober: Arc<Prober>,
    resolver: FactResolver,
    seeds: SeedFetcher,
    points: Mutex<Accumulator>,
}

impl CosmicLens {
    /// Session backed by Gemini when the config carries a key, otherwise fully offline.
    pub fn new(config: Config) -> Self {
        let transport = GeminiTransport::from_config(&config)
            .map(|t| Arc::new(t) as Arc<dyn GenerativeTransport>);
        Self::build(config, transport)
    }

    /// Session with an explicit transport.
    pub fn with_transport(config: Config, transport: Arc<dyn GenerativeTransport>) -> Self {
        Self::build(config, Some(transport))
    }

    /// Session that never contacts a remote service.
    pub fn offline(config: Config) -> Self {
        Self::build(config.without_api_key(), None)
    }

    fn build(config: Config, transport: Option<Arc<dyn GenerativeTransport>>) -> Self {
        info!(
            "Cosmic Lens session: model={} configured={}",
            config.model,
            config.is_configured() && transport.is_some()
        );
        let prober = Arc::new(Prober::new(config.clone(), transport.clone()));
        Self {
            resolver: FactResolver::new(config.clone(), transport.clone(), prober.clone()),
            seeds: SeedFetcher::new(config, transport, prober.clone()),
            prober,
            points: Mutex::new(Accumulator::new()),
        }
    }

    pub async fn probe_connectivity(&self) -> ConnectionResult {
        self.prober.probe().await
    }

    pub async fn reprobe(&self) -> ConnectionResult {
        self.prober.reprobe().await
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.prober.state()
    }

    pub async fn resolve(&self, query: &str) -> CelestialRecord {
        self.resolver.resolve(query).await
    }

    /// Fetch the seed set and install it as the current point set.
    pub async fn seed_points(&self) -> Vec<PlotPoint> {
        let seeds = self.seeds.fetch().await;
        let mut points = self.points.lock().await;
        points.seed(seeds);
        points.points().to_vec()
    }

    pub async fn add_from_record(&self, record: &CelestialRecord) -> Option<PlotPoint> {
        self.points.lock().await.add_from_record(record)
    }

    /// Resolve a query and merge the result into the point set.
    pub async fn explore(&self, query: &str) -> (CelestialRecord, Option<PlotPoint>) {
        let record = self.resolve(query).await;
        let point = self.add_from_record(&record).await;
        (record, point)
    }

    pub async fn points(&self) -> Vec<PlotPoint> {
        self.points.lock().await.points().to_vec()
    }

    pub async fn phase(&self) -> PointSetPhase {
        self.points.lock().await.phase()
    }

    /// Display string for the status indicator.
    pub fn status_line(&self) -> String {
        match self.connectivity() {
            ConnectivityState::Unknown => "UNKNOWN: connectivity not yet checked".to_string(),
            state => match state.reason() {
                Some(code) => format!("{}: {}", code, code.describe()),
                None => state.to_string(),
            },
        }
    }
}
