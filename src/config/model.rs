// src/config/model.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RoutingStyle;

/// Top-level job document as read from YAML, JSON or TOML.
///
/// ```yaml
/// canvas:
///   width: 800
///   height: 600
///   routing: orthogonal
///
/// jobs:
///   - job: J1
///     name: fetch
///     value: "pull sources"
///   - job: J2
///     name: build
///     depend: fetch
///   - name: test
///     depend: [build]
/// ```
///
/// `jobs` is kept as an untyped value so that the shape check (missing,
/// not a list) can be reported as a schema error instead of a parser error.
/// Use [`JobDocument`] (via `TryFrom`) for the validated form.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDocument {
    /// Canvas / interaction settings from `canvas`.
    #[serde(default)]
    pub canvas: CanvasSection,

    /// The raw `jobs` entry, if present.
    #[serde(default)]
    pub jobs: Option<Value>,
}

/// Validated job document.
///
/// Only produced by `TryFrom<RawDocument>` (see `config::validate`).
#[derive(Debug, Clone)]
pub struct JobDocument {
    pub canvas: CanvasSection,
    pub jobs: Vec<JobSpec>,
}

impl JobDocument {
    pub(crate) fn new_unchecked(canvas: CanvasSection, jobs: Vec<JobSpec>) -> Self {
        Self { canvas, jobs }
    }
}

/// `canvas` section.
///
/// Dimensions are in canvas units (pixels for the reference renderer).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CanvasSection {
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    /// Default width of a freshly placed node.
    #[serde(default = "default_node_width")]
    pub node_width: f64,

    /// Default height of a freshly placed node.
    #[serde(default = "default_node_height")]
    pub node_height: f64,

    /// Maximum pointer distance at which a dragged connection snaps to an
    /// anchor.
    #[serde(default = "default_snap_radius")]
    pub snap_radius: f64,

    /// Connector drawing policy.
    #[serde(default)]
    pub routing: RoutingStyle,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

fn default_node_width() -> f64 {
    100.0
}

fn default_node_height() -> f64 {
    40.0
}

fn default_snap_radius() -> f64 {
    20.0
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            node_width: default_node_width(),
            node_height: default_node_height(),
            snap_radius: default_snap_radius(),
            routing: RoutingStyle::default(),
        }
    }
}

/// One entry of the `jobs` list exactly as written.
///
/// Every field is loosely typed: identifiers may be numbers, `depend`
/// may be a string, a list or garbage. [`JobSpec::from_raw`] normalizes.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawJobRecord {
    /// Optional task identifier used for cross-referencing.
    #[serde(default)]
    pub job: Option<Value>,

    /// Display / identity key.
    #[serde(default)]
    pub name: Option<Value>,

    /// Optional display payload.
    #[serde(default)]
    pub value: Option<Value>,

    /// Dependencies: a single identifier or a list of identifiers.
    #[serde(default)]
    pub depend: Option<Value>,
}

/// Normalized job record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSpec {
    pub job: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub depend: Vec<String>,
}

impl JobSpec {
    pub fn from_raw(raw: RawJobRecord) -> Self {
        Self {
            job: raw.job.as_ref().and_then(scalar_to_string),
            name: raw.name.as_ref().and_then(scalar_to_string),
            value: raw.value.as_ref().and_then(scalar_to_string),
            depend: normalize_depend(raw.depend.as_ref()),
        }
    }

    /// Identity of this record in the graph: `name`, else `job`.
    pub fn identity(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.job.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// Normalize a `depend` value into a list of identifiers.
///
/// - a string or number becomes a one-element list
/// - a list keeps its non-empty string and number entries
/// - anything else (null, mapping, bool, ...) yields no dependencies
///
/// Numbers are stringified the same way numeric `name`s are, so `depend: 5`
/// and `depend: [5]` both refer to the job named `5`.
pub fn normalize_depend(depend: Option<&Value>) -> Vec<String> {
    match depend {
        Some(Value::Array(items)) => items.iter().filter_map(dependency_id).collect(),
        Some(scalar) => dependency_id(scalar).into_iter().collect(),
        None => Vec::new(),
    }
}

fn dependency_id(value: &Value) -> Option<String> {
    match value {
        Value::String(_) | Value::Number(_) => scalar_to_string(value).filter(|s| !s.is_empty()),
        _ => None,
    }
}

/// Render a scalar value as a display string. `null` and containers yield `None`.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
