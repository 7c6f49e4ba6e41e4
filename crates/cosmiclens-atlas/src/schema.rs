//! Remote JSON contract: the schemas sent with each request and strict
//! validation of what comes back.

use cosmiclens_core::{CelestialRecord, PlotPoint, PlotPosition};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

/// Why a remote payload was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("response is not JSON: {0}")]
    NotJson(String),

    #[error("expected a JSON {expected}")]
    WrongShape { expected: &'static str },

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("field {field} should be a {expected}")]
    WrongType { field: &'static str, expected: &'static str },

    #[error("field {0} is empty")]
    EmptyField(&'static str),
}

/// Weight bounds for remotely supplied seed points.
pub const WEIGHT_RANGE: (f64, f64) = (10.0, 60.0);

const RECORD_STRING_FIELDS: [&str; 8] = [
    "name",
    "type",
    "distance",
    "mass",
    "temperature",
    "description",
    "funFact",
    "discoveryYear",
];

/// Response schema for a single record lookup.
pub fn record_schema() -> Value {
    let mut required: Vec<&str> = RECORD_STRING_FIELDS.to_vec();
    required.push("coordinates");
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "type": {"type": "STRING"},
            "distance": {"type": "STRING", "description": "Distance from Earth with units"},
            "mass": {"type": "STRING"},
            "temperature": {"type": "STRING"},
            "description": {"type": "STRING", "description": "A comprehensive 2-sentence description"},
            "funFact": {"type": "STRING", "description": "A surprising or mind-blowing fact"},
            "discoveryYear": {"type": "STRING"},
            "coordinates": {
                "type": "OBJECT",
                "properties": {
                    "x": {"type": "NUMBER", "description": "Value 0-100 representing distance or age"},
                    "y": {"type": "NUMBER", "description": "Value 0-100 representing luminosity or energy"}
                },
                "required": ["x", "y"]
            }
        },
        "required": required
    })
}

/// Response schema for the initial point population.
pub fn nodes_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {"type": "STRING"},
                "type": {"type": "STRING"},
                "x": {"type": "NUMBER", "description": "0-100"},
                "y": {"type": "NUMBER", "description": "0-100"},
                "z": {"type": "NUMBER", "description": "Size factor 10-60"},
                "color": {"type": "STRING", "description": "Hex color code matching the object's visual spectral type"}
            },
            "required": ["name", "type", "x", "y", "z", "color"]
        }
    })
}

pub fn record_prompt(query: &str) -> String {
    // The query is embedded as a JSON string literal so quotes and backslashes stay inert.
    let quoted = serde_json::to_string(query).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "Provide detailed astronomical data for the celestial object or concept: {quoted}.\n\
         If the query is generic (like \"black hole\"), pick a specific famous instance and describe it with concrete data.\n\
         If the object is hypothetical or does not exist, say so by using a type that contains the word \"Hypothetical\".\n\
         Map the object to abstract X (distance/age, 0-100) and Y (luminosity/energy, 0-100) coordinates for a scatter plot."
    )
}

pub fn nodes_prompt(count: usize) -> String {
    format!(
        "Generate a list of {count} diverse and interesting specific celestial objects for a star map scatter plot.\n\
         The list MUST include a mix of black holes, exoplanets, nebulae, galaxies, pulsars or neutron stars, quasars and hypergiants.\n\
         Ensure every name is unique. Do not list the same object twice.\n\
         Return JSON."
    )
}

/// Parse and validate a single-record response. Coordinates are clamped into range.
pub fn parse_record(text: &str) -> Result<CelestialRecord, SchemaError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| SchemaError::NotJson(e.to_string()))?;
    let obj = value
        .as_object()
        .ok_or(SchemaError::WrongShape { expected: "object" })?;

    let coords = obj
        .get("coordinates")
        .ok_or(SchemaError::MissingField("coordinates"))?
        .as_object()
        .ok_or(SchemaError::WrongType { field: "coordinates", expected: "object" })?;
    let x = number(coords, "x")?;
    let y = number(coords, "y")?;

    Ok(CelestialRecord {
        name: string(obj, "name")?,
        category: string(obj, "type")?,
        distance_label: string(obj, "distance")?,
        mass_label: string(obj, "mass")?,
        temperature_label: string(obj, "temperature")?,
        summary: string(obj, "description")?,
        highlight: string(obj, "funFact")?,
        discovered_label: string(obj, "discoveryYear")?,
        plot_position: Some(PlotPosition::clamped(x, y)),
        is_simulated: false,
        color_hint: None,
    })
}

/// Parse a seed-population response. Items that fail validation are skipped;
/// later duplicates of a name are dropped.
pub fn parse_nodes(text: &str) -> Result<Vec<PlotPoint>, SchemaError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| SchemaError::NotJson(e.to_string()))?;
    let items = value
        .as_array()
        .ok_or(SchemaError::WrongShape { expected: "array" })?;

    let mut seen = HashSet::new();
    let mut points = Vec::with_capacity(items.len());
    for item in items {
        let Some(point) = item.as_object().and_then(|obj| node(obj).ok()) else {
            continue;
        };
        if seen.insert(point.name.clone()) {
            points.push(point);
        }
    }
    Ok(points)
}

fn node(obj: &Map<String, Value>) -> Result<PlotPoint, SchemaError> {
    let (wlo, whi) = WEIGHT_RANGE;
    let weight = number(obj, "z")?;
    let weight = if weight.is_finite() { weight.clamp(wlo, whi) } else { wlo };
    Ok(PlotPoint::new(
        string(obj, "name")?,
        string(obj, "type")?,
        number(obj, "x")?,
        number(obj, "y")?,
        weight,
        string(obj, "color")?,
    ))
}

fn string(obj: &Map<String, Value>, field: &'static str) -> Result<String, SchemaError> {
    let s = obj
        .get(field)
        .ok_or(SchemaError::MissingField(field))?
        .as_str()
        .ok_or(SchemaError::WrongType { field, expected: "string" })?;
    if s.trim().is_empty() {
        return Err(SchemaError::EmptyField(field));
    }
    Ok(s.to_string())
}

fn number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, SchemaError> {
    obj.get(field)
        .ok_or(SchemaError::MissingField(field))?
        .as_f64()
        .ok_or(SchemaError::WrongType { field, expected: "number" })
}
