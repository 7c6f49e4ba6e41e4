//! Core types for Cosmic Lens

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Lower bound of both plot axes.
pub const PLOT_MIN: f64 = 0.0;
/// Upper bound of both plot axes.
pub const PLOT_MAX: f64 = 100.0;

/// Abstract scatter-plot coordinates.
///
/// `x` loosely tracks distance or age, `y` luminosity or energy. Neither is a
/// physical unit; both live in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotPosition {
    pub x: f64,
    pub y: f64,
}

impl PlotPosition {
    /// Build a position, pulling each axis into `[0, 100]`.
    /// Non-finite input lands on the centre of the axis.
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    pub fn is_in_range(&self) -> bool {
        (PLOT_MIN..=PLOT_MAX).contains(&self.x) && (PLOT_MIN..=PLOT_MAX).contains(&self.y)
    }
}

pub fn clamp_axis(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(PLOT_MIN, PLOT_MAX)
    } else {
        (PLOT_MIN + PLOT_MAX) / 2.0
    }
}

/// The canonical result of a lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialRecord {
    pub name: String,
    pub category: String,
    pub distance_label: String,
    pub mass_label: String,
    pub temperature_label: String,
    pub summary: String,
    pub highlight: String,
    pub discovered_label: String,
    /// Always populated by the resolver. Records assembled elsewhere may omit it,
    /// in which case they never reach the point set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_position: Option<PlotPosition>,
    pub is_simulated: bool,
    /// Preferred colour when the record came from the local generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_hint: Option<String>,
}

impl CelestialRecord {
    /// Hypothetical or non-existent objects carry the marker in their category.
    pub fn is_hypothetical(&self) -> bool {
        self.category.to_lowercase().contains("hypothetical")
    }

    /// Check the completeness invariant: every label populated, position present and in range.
    pub fn validate(&self) -> Result<()> {
        let labels = [
            ("name", &self.name),
            ("category", &self.category),
            ("distanceLabel", &self.distance_label),
            ("massLabel", &self.mass_label),
            ("temperatureLabel", &self.temperature_label),
            ("summary", &self.summary),
            ("highlight", &self.highlight),
            ("discoveredLabel", &self.discovered_label),
        ];
        for (field, value) in labels {
            if value.trim().is_empty() {
                return Err(Error::invalid_record(field, "empty"));
            }
        }
        match self.plot_position {
            None => Err(Error::invalid_record("plotPosition", "missing")),
            Some(p) if !p.is_in_range() => Err(Error::invalid_record(
                "plotPosition",
                format!("({}, {}) outside [0, 100]", p.x, p.y),
            )),
            Some(_) => Ok(()),
        }
    }
}

/// Reduced visual representation of a record, one dot on the scatter plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPoint {
    pub name: String,
    pub category: String,
    pub x: f64,
    pub y: f64,
    pub weight: f64,
    pub color_hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_label: Option<String>,
}

impl PlotPoint {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        x: f64,
        y: f64,
        weight: f64,
        color_hint: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            x: clamp_axis(x),
            y: clamp_axis(y),
            weight,
            color_hint: color_hint.into(),
            summary: None,
            distance_label: None,
        }
    }

    pub fn position(&self) -> PlotPosition {
        PlotPosition { x: self.x, y: self.y }
    }
}

/// Closed set of connectivity classifications surfaced to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    KeyMissing,
    KeyRejected,
    QuotaExceeded,
    ModelError,
    ConnectionFailed,
    Online,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::KeyMissing => "KEY_MISSING",
            ReasonCode::KeyRejected => "KEY_REJECTED",
            ReasonCode::QuotaExceeded => "QUOTA_EXCEEDED",
            ReasonCode::ModelError => "MODEL_ERROR",
            ReasonCode::ConnectionFailed => "CONNECTION_FAILED",
            ReasonCode::Online => "ONLINE",
        }
    }

    /// Short status text for the status indicator.
    pub fn describe(&self) -> &'static str {
        match self {
            ReasonCode::KeyMissing => "No API key configured; running in simulation mode",
            ReasonCode::KeyRejected => "API key rejected; running in simulation mode",
            ReasonCode::QuotaExceeded => "API quota exceeded; running in simulation mode",
            ReasonCode::ModelError => "Model unavailable; running in simulation mode",
            ReasonCode::ConnectionFailed => "Connection failed; running in simulation mode",
            ReasonCode::Online => "Live uplink established",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a connectivity probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResult {
    pub success: bool,
    pub reason_code: ReasonCode,
}

impl ConnectionResult {
    pub fn online() -> Self {
        Self {
            success: true,
            reason_code: ReasonCode::Online,
        }
    }

    pub fn failed(reason_code: ReasonCode) -> Self {
        Self {
            success: false,
            reason_code,
        }
    }
}

/// Session-level connectivity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectivityState {
    #[default]
    Unknown,
    Online,
    Offline(ReasonCode),
}

impl ConnectivityState {
    pub fn is_offline(&self) -> bool {
        matches!(self, ConnectivityState::Offline(_))
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            ConnectivityState::Unknown => None,
            ConnectivityState::Online => Some(ReasonCode::Online),
            ConnectivityState::Offline(code) => Some(*code),
        }
    }
}

impl From<ConnectionResult> for ConnectivityState {
    fn from(result: ConnectionResult) -> Self {
        if result.success {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline(result.reason_code)
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivityState::Unknown => f.write_str("UNKNOWN"),
            ConnectivityState::Online => f.write_str("ONLINE"),
            ConnectivityState::Offline(code) => write!(f, "OFFLINE ({})", code),
        }
    }
}
