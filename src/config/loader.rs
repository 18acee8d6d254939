// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::{JobDocument, RawDocument};
use crate::errors::Result;

/// Serialization format of a job document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick a format from the file extension; unknown extensions read as YAML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => DocumentFormat::Json,
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse document text in the given format into a `RawDocument`.
///
/// This only performs deserialization; it does **not** check the `jobs`
/// shape. Use [`load_str`] or [`load_and_validate`] for that.
pub fn parse_str(contents: &str, format: DocumentFormat) -> Result<RawDocument> {
    let raw = match format {
        DocumentFormat::Yaml => {
            // An empty YAML file is `null`, which should read as "no jobs".
            if contents.trim().is_empty() {
                RawDocument::default()
            } else {
                serde_yaml::from_str(contents)?
            }
        }
        DocumentFormat::Json => serde_json::from_str(contents)?,
        DocumentFormat::Toml => toml::from_str(contents)?,
    };
    Ok(raw)
}

/// Load a document file from a given path and return the raw `RawDocument`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawDocument> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path);
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, bytes = contents.len(), "read job document");
    parse_str(&contents, format)
}

/// Parse and validate document text.
pub fn load_str(contents: &str, format: DocumentFormat) -> Result<JobDocument> {
    let raw = parse_str(contents, format)?;
    JobDocument::try_from(raw)
}

/// Load a document from path and run shape validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads YAML / JSON / TOML (by extension).
/// - Applies `canvas` defaults (handled by `serde` + `Default` impls).
/// - Checks that `jobs` exists and is a list, and that canvas values are sane.
///
/// Graph-level findings (dangling references, cycles) are *not* errors
/// here; see `dag::validator`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<JobDocument> {
    let raw = load_from_path(&path)?;
    JobDocument::try_from(raw)
}
