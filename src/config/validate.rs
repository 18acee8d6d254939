// src/config/validate.rs

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::model::{CanvasSection, JobDocument, JobSpec, RawDocument, RawJobRecord};
use crate::errors::{JobGraphError, Result};

impl TryFrom<RawDocument> for JobDocument {
    type Error = JobGraphError;

    fn try_from(raw: RawDocument) -> std::result::Result<Self, Self::Error> {
        validate_canvas(&raw.canvas)?;
        let jobs = extract_jobs(raw.jobs)?;
        Ok(JobDocument::new_unchecked(raw.canvas, jobs))
    }
}

/// Validate an already-built document (e.g. one assembled in tests).
pub fn validate_document(doc: &JobDocument) -> Result<()> {
    validate_canvas(&doc.canvas)
}

fn validate_canvas(canvas: &CanvasSection) -> Result<()> {
    let positive = [
        ("width", canvas.width),
        ("height", canvas.height),
        ("node_width", canvas.node_width),
        ("node_height", canvas.node_height),
        ("snap_radius", canvas.snap_radius),
    ];

    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(JobGraphError::ConfigError(format!(
                "canvas.{field} must be a positive number (got {value})"
            )));
        }
    }

    Ok(())
}

/// Pull the `jobs` list out of the raw document.
///
/// Missing or non-list `jobs` is fatal. Entries that are not mappings are
/// skipped, as are mappings whose fields cannot be read at all.
fn extract_jobs(jobs: Option<Value>) -> Result<Vec<JobSpec>> {
    let items = match jobs {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(JobGraphError::MalformedSchema(format!(
                "`jobs` must be a list (got {})",
                value_kind(&other)
            )));
        }
        None => {
            return Err(JobGraphError::MalformedSchema(
                "document has no `jobs` list".to_string(),
            ));
        }
    };

    let mut specs = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!(index, kind = value_kind(&item), "skipping non-mapping entry in `jobs`");
            continue;
        }
        match serde_json::from_value::<RawJobRecord>(item) {
            Ok(raw) => specs.push(JobSpec::from_raw(raw)),
            Err(err) => {
                warn!(index, error = %err, "skipping unreadable entry in `jobs`");
            }
        }
    }

    debug!(count = specs.len(), "parsed job records");
    Ok(specs)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
