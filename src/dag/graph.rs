// src/dag/graph.rs

use std::collections::BTreeMap;

use petgraph::graphmap::DiGraphMap;
use tracing::{debug, info, warn};

use crate::config::model::JobDocument;
use crate::dag::job::Job;
use crate::errors::{JobGraphError, Result};
use crate::types::JobId;

/// In-memory job graph keyed by job id.
///
/// Jobs are kept in ascending id order, which is the iteration order of
/// every query below. Edges are not stored separately; they are derived
/// from each job's `depends` list:
///
/// - a *declared* pair is any `(dep, job)` with `dep` in `job.depends`
/// - a *resolved* edge is a declared pair whose `dep` is itself a job
///
/// Dangling declarations are kept (they are reported by the validator),
/// but only resolved edges take part in ordering, layout and rendering.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    jobs: BTreeMap<JobId, Job>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a validated [`JobDocument`].
    ///
    /// Identity is `name`, falling back to `job`. Records with neither are
    /// skipped. A duplicate identity or a self dependency aborts the whole
    /// build.
    pub fn from_document(doc: &JobDocument) -> Result<Self> {
        let mut graph = Self::new();

        for (index, spec) in doc.jobs.iter().enumerate() {
            match Job::from_spec(spec) {
                Some(job) => graph.add_job(job)?,
                None => warn!(index, "job record has neither `name` nor `job`; skipping"),
            }
        }

        info!(
            jobs = graph.len(),
            declared = graph.dependency_pairs().count(),
            resolved = graph.edges().count(),
            "built job graph"
        );
        Ok(graph)
    }

    /// Build a graph from `(from, to)` pairs, creating jobs as needed.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut graph = Self::new();
        for (from, to) in pairs {
            for id in [from, to] {
                if !graph.contains(id) {
                    graph.add_job(Job::named(id))?;
                }
            }
            graph.add_dependency(from, to)?;
        }
        Ok(graph)
    }

    /// Insert a job.
    ///
    /// Fails with `DuplicateId` if the id exists and `SelfDependency` if the
    /// job lists itself as a prerequisite.
    pub fn add_job(&mut self, job: Job) -> Result<()> {
        if self.jobs.contains_key(&job.id) {
            return Err(JobGraphError::DuplicateId(job.id));
        }
        if job.depends.iter().any(|d| d == &job.id) {
            return Err(JobGraphError::SelfDependency(job.id));
        }

        debug!(job = %job.id, deps = ?job.depends, "adding job");
        self.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    /// Remove a job and every edge touching it.
    ///
    /// The id is also stripped from the `depends` list of every other job,
    /// so no declaration refers to it afterwards. Unknown ids are a no-op.
    pub fn remove_job(&mut self, id: &str) -> Option<Job> {
        let removed = self.jobs.remove(id)?;

        for job in self.jobs.values_mut() {
            job.depends.retain(|dep| dep != id);
        }

        debug!(job = %id, "removed job and incident edges");
        Some(removed)
    }

    /// Declare `to` as depending on `from`.
    ///
    /// Returns `Ok(false)` if the dependency already existed.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> Result<bool> {
        if from == to {
            return Err(JobGraphError::SelfDependency(from.to_string()));
        }
        if !self.jobs.contains_key(from) {
            return Err(JobGraphError::JobNotFound(from.to_string()));
        }
        let job = self
            .jobs
            .get_mut(to)
            .ok_or_else(|| JobGraphError::JobNotFound(to.to_string()))?;

        let added = job.push_dependency(from.to_string());
        if added {
            debug!(from, to, "added dependency");
        }
        Ok(added)
    }

    /// Drop the declaration `to depends on from`. Returns whether it existed.
    pub fn remove_dependency(&mut self, from: &str, to: &str) -> bool {
        match self.jobs.get_mut(to) {
            Some(job) => {
                let before = job.depends.len();
                job.depends.retain(|dep| dep != from);
                before != job.depends.len()
            }
            None => false,
        }
    }

    /// Every declared `(from, to)` pair.
    ///
    /// Each call starts a fresh pass over the current state.
    pub fn dependency_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.jobs.values().flat_map(|job| {
            job.depends
                .iter()
                .map(move |dep| (dep.as_str(), job.id.as_str()))
        })
    }

    /// Declared pairs whose prerequisite exists as a job.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.dependency_pairs()
            .filter(move |(from, _)| self.jobs.contains_key(*from))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// All jobs in ascending id order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// All job ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.jobs.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Resolved prerequisites of a job.
    pub fn dependencies_of<'a>(&'a self, id: &str) -> Vec<&'a str> {
        self.jobs
            .get(id)
            .map(|job| {
                job.depends
                    .iter()
                    .filter(|dep| self.jobs.contains_key(dep.as_str()))
                    .map(|dep| dep.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Jobs that list `id` among their prerequisites, ascending.
    pub fn dependents_of<'a>(&'a self, id: &str) -> Vec<&'a str> {
        if !self.jobs.contains_key(id) {
            return Vec::new();
        }
        self.jobs
            .values()
            .filter(|job| job.depends.iter().any(|dep| dep == id))
            .map(|job| job.id.as_str())
            .collect()
    }

    /// Snapshot as a petgraph map graph over resolved edges.
    ///
    /// Edge direction: prerequisite -> dependent.
    pub fn to_digraph(&self) -> DiGraphMap<&str, ()> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for id in self.ids() {
            graph.add_node(id);
        }
        for (from, to) in self.edges() {
            graph.add_edge(from, to, ());
        }
        graph
    }
}
