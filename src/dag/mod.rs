// src/dag/mod.rs

//! Job graph model, validation and ordering.
//!
//! - [`graph`] holds the job map and derives dependency edges from it.
//! - [`job`] defines a single job node.
//! - [`validator`] finds dangling references and cycles (as data, never errors).
//! - [`topo`] produces the deterministic execution order.
//! - [`plan`] builds the execution plan and the dependency analysis.

pub mod graph;
pub mod job;
pub mod plan;
pub mod topo;
pub mod validator;

pub use graph::GraphModel;
pub use job::Job;
pub use plan::{AnalysisSummary, PlanEntry, analyze, execution_plan};
pub use validator::{
    GraphWarning, ValidationReport, find_cycles, find_dangling_references, validate,
};
