// src/routing/anchor.rs

//! Connection anchors and snap lookup.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use crate::layout::geometry::{NodeBox, Point};
use crate::layout::nodes::NodeTable;
use crate::types::JobId;

/// One of the four fixed connection points on a node's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    /// Stable enumeration order used for snapping tie-breaks.
    pub const ALL: [Anchor; 4] = [Anchor::Top, Anchor::Bottom, Anchor::Left, Anchor::Right];

    /// Unit vector pointing away from the node through this anchor.
    pub fn outward(self) -> (f64, f64) {
        match self {
            Anchor::Top => (0.0, -1.0),
            Anchor::Bottom => (0.0, 1.0),
            Anchor::Left => (-1.0, 0.0),
            Anchor::Right => (1.0, 0.0),
        }
    }

    /// Whether the anchor sits on a horizontal edge (top / bottom).
    pub fn is_vertical(self) -> bool {
        matches!(self, Anchor::Top | Anchor::Bottom)
    }

    pub fn opposite(self) -> Anchor {
        match self {
            Anchor::Top => Anchor::Bottom,
            Anchor::Bottom => Anchor::Top,
            Anchor::Left => Anchor::Right,
            Anchor::Right => Anchor::Left,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
        };
        f.write_str(s)
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Anchor::Top),
            "bottom" => Ok(Anchor::Bottom),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            other => Err(format!(
                "invalid anchor: {other} (expected top, bottom, left or right)"
            )),
        }
    }
}

/// A specific anchor on a specific node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AnchorRef {
    pub node: JobId,
    pub anchor: Anchor,
}

impl AnchorRef {
    pub fn new(node: impl Into<JobId>, anchor: Anchor) -> Self {
        Self {
            node: node.into(),
            anchor,
        }
    }
}

/// Absolute coordinate of `anchor` on `node`.
pub fn anchor_coordinate(node: &NodeBox, anchor: Anchor) -> Point {
    let (ox, oy) = anchor.outward();
    node.center
        .offset(ox * node.size.width / 2.0, oy * node.size.height / 2.0)
}

/// Nearest anchor to `pointer` strictly within `snap_radius`.
///
/// Nodes are scanned in ascending id order and anchors in [`Anchor::ALL`]
/// order; a later candidate only wins if it is strictly closer, so on ties
/// the first one found is returned. `exclude` skips the node the drag
/// started from.
pub fn find_nearest_anchor(
    nodes: &NodeTable,
    exclude: Option<&str>,
    pointer: Point,
    snap_radius: f64,
) -> Option<AnchorRef> {
    let mut best: Option<(f64, AnchorRef)> = None;

    for (id, node) in nodes.iter() {
        if exclude == Some(id) {
            continue;
        }
        for anchor in Anchor::ALL {
            let distance = anchor_coordinate(node, anchor).distance_to(pointer);
            if distance >= snap_radius {
                continue;
            }
            let closer = best.as_ref().is_none_or(|(d, _)| distance < *d);
            if closer {
                best = Some((distance, AnchorRef::new(id, anchor)));
            }
        }
    }

    if let Some((distance, found)) = &best {
        trace!(node = %found.node, anchor = %found.anchor, distance, "snap candidate");
    }
    best.map(|(_, found)| found)
}
