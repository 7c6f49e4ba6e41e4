//! Session configuration: serde struct for cosmiclens.toml plus environment overrides
//!
//! The config is an explicit value handed to the prober, resolver and seed
//! fetcher. Nothing here reads the environment behind the caller's back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the credential, in order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

const PLACEHOLDER_KEYS: &[&str] = &["PLACEHOLDER_API_KEY", "your_api_key_here", "undefined", "null"];

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub seed_timeout_ms: u64,
    pub simulated_latency_ms: u64,
    pub seed_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 20_000,
            seed_timeout_ms: 8_000,
            simulated_latency_ms: 0,
            seed_count: 25,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("seed_timeout_ms", &self.seed_timeout_ms)
            .field("simulated_latency_ms", &self.simulated_latency_ms)
            .field("seed_count", &self.seed_count)
            .finish()
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let mut config: Config = toml::from_str(&content)?;
                config.api_key = normalize_key(config.api_key.as_deref());
                config.check()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Defaults layered with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Layer overrides from an arbitrary variable lookup. Unparseable numbers are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .find_map(|var| normalize_key(lookup(var).as_deref()))
        {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup("COSMICLENS_MODEL").filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(url) = lookup("COSMICLENS_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(ms) = parse_var(&lookup, "COSMICLENS_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "COSMICLENS_SEED_TIMEOUT_MS") {
            self.seed_timeout_ms = ms;
        }
        if let Some(ms) = parse_var(&lookup, "COSMICLENS_SIMULATED_LATENCY_MS") {
            self.simulated_latency_ms = ms;
        }
        if let Some(n) = parse_var(&lookup, "COSMICLENS_SEED_COUNT") {
            self.seed_count = n;
        }
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key: String = key.into();
        self.api_key = normalize_key(Some(key.as_str()));
        self
    }

    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    pub fn with_seed_timeout_ms(mut self, ms: u64) -> Self {
        self.seed_timeout_ms = ms;
        self
    }

    pub fn with_simulated_latency_ms(mut self, ms: u64) -> Self {
        self.simulated_latency_ms = ms;
        self
    }

    /// A usable credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn seed_timeout(&self) -> Duration {
        Duration::from_millis(self.seed_timeout_ms)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    fn check(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::config("model must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        if self.seed_count == 0 {
            return Err(Error::config("seed_count must be at least 1"));
        }
        Ok(())
    }
}

/// Trim a candidate key and drop empty or placeholder values.
pub fn normalize_key(raw: Option<&str>) -> Option<String> {
    let key = raw?.trim();
    if key.is_empty()
        || key.starts_with("YOUR_")
        || PLACEHOLDER_KEYS.iter().any(|p| p.eq_ignore_ascii_case(key))
    {
        return None;
    }
    Some(key.to_string())
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(name).and_then(|v| v.trim().parse().ok())
}
