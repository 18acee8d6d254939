// src/config/mod.rs

//! Job document loading and validation.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a document from disk or a string in YAML, JSON or TOML (`loader.rs`).
//! - Validate the document shape and canvas settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DocumentFormat, load_and_validate, load_from_path, load_str, parse_str};
pub use model::{CanvasSection, JobDocument, JobSpec, RawDocument, RawJobRecord, normalize_depend};
pub use validate::validate_document;
