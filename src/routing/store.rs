// src/routing/store.rs

//! Live connections with realized geometry.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{JobGraphError, Result};
use crate::layout::nodes::NodeTable;
use crate::routing::anchor::{AnchorRef, anchor_coordinate};
use crate::routing::path::ConnectorPath;
use crate::types::RoutingStyle;

/// Stable handle of a stored connection. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A directed connection from a prerequisite's anchor to a dependent's anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: AnchorRef,
    pub target: AnchorRef,
    pub path: ConnectorPath,
}

impl Connection {
    pub fn touches(&self, node: &str) -> bool {
        self.source.node == node || self.target.node == node
    }
}

/// The set of connections currently on the canvas.
///
/// Geometry is derived state: [`ConnectionStore::recompute_all`] rebuilds
/// every path from the node table alone, so repeated recomputation cannot
/// drift.
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    style: RoutingStyle,
    next_id: u64,
    connections: BTreeMap<ConnectionId, Connection>,
}

impl ConnectionStore {
    pub fn new(style: RoutingStyle) -> Self {
        Self {
            style,
            next_id: 1,
            connections: BTreeMap::new(),
        }
    }

    pub fn style(&self) -> RoutingStyle {
        self.style
    }

    /// Switch routing policy and re-route everything.
    pub fn set_style(&mut self, style: RoutingStyle, nodes: &NodeTable) {
        self.style = style;
        self.recompute_all(nodes);
    }

    /// Insert a connection.
    ///
    /// Returns `Ok(None)` if the exact `(source, target)` anchor tuple is
    /// already stored or if both ends sit on the same node. Fails for
    /// endpoints missing from `nodes`.
    pub fn connect(
        &mut self,
        source: AnchorRef,
        target: AnchorRef,
        nodes: &NodeTable,
    ) -> Result<Option<ConnectionId>> {
        if source.node == target.node {
            debug!(node = %source.node, "refusing to connect a node to itself");
            return Ok(None);
        }
        if self.find(&source, &target).is_some() {
            debug!(
                source = %source.node,
                target = %target.node,
                "connection already exists; ignoring"
            );
            return Ok(None);
        }

        let path = route(&source, &target, nodes, self.style)?;
        let id = ConnectionId(self.next_id);
        self.next_id += 1;

        debug!(
            %id,
            source = %source.node,
            source_anchor = %source.anchor,
            target = %target.node,
            target_anchor = %target.anchor,
            "connected"
        );
        self.connections.insert(
            id,
            Connection {
                id,
                source,
                target,
                path,
            },
        );
        Ok(Some(id))
    }

    /// Remove a connection (and with it its delete handle).
    pub fn disconnect(&mut self, id: ConnectionId) -> Option<Connection> {
        let removed = self.connections.remove(&id);
        if removed.is_some() {
            debug!(%id, "disconnected");
        }
        removed
    }

    /// Re-derive every path from the current node boxes.
    pub fn recompute_all(&mut self, nodes: &NodeTable) {
        let style = self.style;
        for conn in self.connections.values_mut() {
            match route(&conn.source, &conn.target, nodes, style) {
                Ok(path) => conn.path = path,
                Err(err) => warn!(id = %conn.id, error = %err, "cannot route connection"),
            }
        }
    }

    /// Remove every connection that starts or ends at `node`.
    pub fn remove_incident_to(&mut self, node: &str) -> Vec<Connection> {
        let ids: Vec<ConnectionId> = self
            .connections
            .values()
            .filter(|c| c.touches(node))
            .map(|c| c.id)
            .collect();

        let removed: Vec<Connection> = ids
            .into_iter()
            .filter_map(|id| self.connections.remove(&id))
            .collect();

        if !removed.is_empty() {
            debug!(node, count = removed.len(), "removed incident connections");
        }
        removed
    }

    pub fn find(&self, source: &AnchorRef, target: &AnchorRef) -> Option<ConnectionId> {
        self.connections
            .values()
            .find(|c| &c.source == source && &c.target == target)
            .map(|c| c.id)
    }

    /// Number of connections from node `from` to node `to`, any anchors.
    pub fn connections_between(&self, from: &str, to: &str) -> usize {
        self.connections
            .values()
            .filter(|c| c.source.node == from && c.target.node == to)
            .count()
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn clear(&mut self) {
        self.connections.clear();
    }
}

fn route(
    source: &AnchorRef,
    target: &AnchorRef,
    nodes: &NodeTable,
    style: RoutingStyle,
) -> Result<ConnectorPath> {
    let from = nodes
        .get(&source.node)
        .ok_or_else(|| JobGraphError::JobNotFound(source.node.clone()))?;
    let to = nodes
        .get(&target.node)
        .ok_or_else(|| JobGraphError::JobNotFound(target.node.clone()))?;

    Ok(ConnectorPath::route(
        anchor_coordinate(from, source.anchor),
        anchor_coordinate(to, target.anchor),
        source.anchor,
        style,
    ))
}
