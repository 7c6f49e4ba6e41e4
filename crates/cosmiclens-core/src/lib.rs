//! Cosmic Lens Core - Records, connectivity codes, configuration and errors

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
