use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical job identifier type used throughout the crate.
pub type JobId = String;

/// How connector geometry is drawn between two anchors.
///
/// - `Bezier`: smooth cubic curve with two control points (default).
/// - `Orthogonal`: axis-aligned elbow connector with two bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStyle {
    Bezier,
    Orthogonal,
}

impl Default for RoutingStyle {
    fn default() -> Self {
        RoutingStyle::Bezier
    }
}

impl FromStr for RoutingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bezier" | "curve" => Ok(RoutingStyle::Bezier),
            "orthogonal" | "elbow" => Ok(RoutingStyle::Orthogonal),
            other => Err(format!(
                "invalid routing style: {other} (expected \"bezier\" or \"orthogonal\")"
            )),
        }
    }
}

/// Status of an entry in an execution plan.
///
/// Plans are only ever produced, never executed, so every entry starts
/// (and stays) `Pending` inside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Pending
    }
}
