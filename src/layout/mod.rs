// src/layout/mod.rs

//! Geometry types, the node table and the layered auto-layout.

pub mod geometry;
pub mod layered;
pub mod nodes;

pub use geometry::{NodeBox, Point, Rect, Size};
pub use layered::{LayeredLayout, assign_levels};
pub use nodes::NodeTable;
