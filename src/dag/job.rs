// src/dag/job.rs

//! A single job node.

use crate::config::model::JobSpec;
use crate::types::JobId;

/// A unit of work in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Unique identity key within a graph.
    pub id: JobId,
    /// Display name (defaults to `id`).
    pub name: String,
    /// External task identifier from the `job` field, if any.
    pub task: Option<String>,
    /// Optional display payload.
    pub value: Option<String>,
    /// Prerequisites, in declaration order, without duplicates.
    pub depends: Vec<JobId>,
}

impl Job {
    pub fn new(
        id: impl Into<JobId>,
        name: impl Into<String>,
        value: Option<String>,
        depends: Vec<JobId>,
    ) -> Self {
        let mut job = Self {
            id: id.into(),
            name: name.into(),
            task: None,
            value,
            depends: Vec::new(),
        };
        for dep in depends {
            job.push_dependency(dep);
        }
        job
    }

    /// A job whose display name equals its id and which has no payload.
    pub fn named(id: impl Into<JobId>) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, None, Vec::new())
    }

    pub fn depending_on(mut self, dep: impl Into<JobId>) -> Self {
        self.push_dependency(dep.into());
        self
    }

    /// Build a job from a normalized document record.
    ///
    /// Returns `None` when the record has no usable identity.
    pub fn from_spec(spec: &JobSpec) -> Option<Self> {
        let id = spec.identity()?.to_string();
        let name = spec.name.clone().unwrap_or_else(|| id.clone());
        let mut job = Job::new(id, name, spec.value.clone(), spec.depend.clone());
        job.task = spec.job.clone();
        Some(job)
    }

    /// Label shown on a node: `name` with the payload underneath if present.
    pub fn label(&self) -> String {
        match self.value.as_deref() {
            Some(v) if !v.is_empty() => format!("{}\n({})", self.name, v),
            _ => self.name.clone(),
        }
    }

    /// Append a dependency; returns `false` if it was already declared.
    pub(crate) fn push_dependency(&mut self, dep: JobId) -> bool {
        if dep.is_empty() || self.depends.contains(&dep) {
            return false;
        }
        self.depends.push(dep);
        true
    }
}
