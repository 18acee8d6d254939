// src/routing/mod.rs

//! Anchors, connector geometry and the connection store.
//!
//! - [`anchor`] resolves anchor coordinates and finds snap targets.
//! - [`path`] computes bezier / orthogonal connector points.
//! - [`store`] keeps the live connections and re-routes them on demand.

pub mod anchor;
pub mod path;
pub mod store;

pub use anchor::{Anchor, AnchorRef, anchor_coordinate, find_nearest_anchor};
pub use path::{ConnectorPath, control_points};
pub use store::{Connection, ConnectionId, ConnectionStore};
