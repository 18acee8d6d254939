// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::JobId;

#[derive(Error, Debug)]
pub enum JobGraphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed job document: {0}")]
    MalformedSchema(String),

    #[error("Duplicate job id: {0}")]
    DuplicateId(JobId),

    #[error("Job '{0}' cannot depend on itself")]
    SelfDependency(JobId),

    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Cycle detected in job graph: {}", format_cycles(.0))]
    CyclicGraph(Vec<Vec<JobId>>),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Render cycles as `A -> B -> A; C -> D -> C`.
pub fn format_cycles(cycles: &[Vec<JobId>]) -> String {
    cycles
        .iter()
        .map(|cycle| {
            let mut parts: Vec<&str> = cycle.iter().map(|s| s.as_str()).collect();
            if let Some(first) = cycle.first() {
                parts.push(first.as_str());
            }
            parts.join(" -> ")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, JobGraphError>;
