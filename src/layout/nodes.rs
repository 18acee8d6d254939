// src/layout/nodes.rs

//! The node geometry table: the single source of node positions and sizes.

use std::collections::BTreeMap;

use crate::layout::geometry::{NodeBox, Point, Rect, Size};
use crate::types::JobId;

/// Node id -> bounding box, iterated in ascending id order.
///
/// Routing, snapping and hit testing read positions from here and nowhere
/// else; a renderer only ever receives copies.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    boxes: BTreeMap<JobId, NodeBox>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place every node at the given center with a common size.
    pub fn from_positions<'a>(
        positions: impl IntoIterator<Item = (&'a JobId, &'a Point)>,
        size: Size,
    ) -> Self {
        let boxes = positions
            .into_iter()
            .map(|(id, center)| (id.clone(), NodeBox::new(*center, size)))
            .collect();
        Self { boxes }
    }

    pub fn insert(&mut self, id: impl Into<JobId>, node: NodeBox) -> Option<NodeBox> {
        self.boxes.insert(id.into(), node)
    }

    pub fn remove(&mut self, id: &str) -> Option<NodeBox> {
        self.boxes.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&NodeBox> {
        self.boxes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.boxes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeBox)> {
        self.boxes.iter().map(|(id, b)| (id.as_str(), b))
    }

    /// Move a node's center. Returns `false` for unknown ids.
    pub fn move_to(&mut self, id: &str, center: Point) -> bool {
        match self.boxes.get_mut(id) {
            Some(node) => {
                node.center = center;
                true
            }
            None => false,
        }
    }

    /// Change a node's size, keeping its center. Returns `false` for unknown ids.
    pub fn resize(&mut self, id: &str, size: Size) -> bool {
        match self.boxes.get_mut(id) {
            Some(node) => {
                node.size = size;
                true
            }
            None => false,
        }
    }

    /// First node (ascending id) whose box contains `p`.
    pub fn node_at(&self, p: Point) -> Option<&str> {
        self.iter()
            .find(|(_, node)| node.rect().contains(p))
            .map(|(id, _)| id)
    }

    /// Nodes whose center lies within `rect`, ascending.
    pub fn centers_within(&self, rect: &Rect) -> Vec<JobId> {
        self.iter()
            .filter(|(_, node)| rect.contains(node.center))
            .map(|(id, _)| id.to_string())
            .collect()
    }
}
