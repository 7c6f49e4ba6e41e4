//! Cosmic Lens Atlas - connectivity probing, fact resolution with offline
//! simulation, and the deduplicated plot point set

pub mod accumulator;
pub mod catalog;
pub mod generator;
pub mod lens;
pub mod prober;
pub mod resolver;
pub mod schema;
pub mod seed;

pub use accumulator::{point_from_record, Accumulator, PointSetPhase};
pub use lens::CosmicLens;
pub use prober::{reason_for, Prober};
pub use resolver::FactResolver;
pub use schema::SchemaError;
pub use seed::SeedFetcher;
