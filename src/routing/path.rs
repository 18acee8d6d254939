// src/routing/path.rs

//! Connector geometry between two anchor points.
//!
//! Both policies produce four points: the start anchor, two intermediate
//! points and the end anchor. For [`RoutingStyle::Bezier`] the middle two
//! are cubic control points; for [`RoutingStyle::Orthogonal`] they are the
//! bends of an axis-aligned polyline. Renderers draw the arrowhead from
//! [`ConnectorPath::arrow_direction`].

use serde::Serialize;

use crate::layout::geometry::Point;
use crate::routing::anchor::Anchor;
use crate::types::RoutingStyle;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorPath {
    pub style: RoutingStyle,
    pub points: Vec<Point>,
}

impl ConnectorPath {
    /// Route from `start` (sitting on `start_anchor`) to `end`.
    pub fn route(start: Point, end: Point, start_anchor: Anchor, style: RoutingStyle) -> Self {
        let mut points = Vec::with_capacity(4);
        points.push(start);
        points.extend(control_points(start, end, start_anchor, style));
        points.push(end);
        Self { style, points }
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Intermediate points (control points or bends).
    pub fn interior(&self) -> &[Point] {
        match self.points.len() {
            0..=2 => &[],
            n => &self.points[1..n - 1],
        }
    }

    /// Unit direction of the last segment with non-zero length.
    ///
    /// Returns `None` only when every point coincides.
    pub fn arrow_direction(&self) -> Option<(f64, f64)> {
        self.points.windows(2).rev().find_map(|pair| {
            let dx = pair[1].x - pair[0].x;
            let dy = pair[1].y - pair[0].y;
            let len = dx.hypot(dy);
            (len > f64::EPSILON).then(|| (dx / len, dy / len))
        })
    }

    /// Where the renderer places the connection's delete handle.
    pub fn handle_point(&self) -> Option<Point> {
        Some(self.start()?.midpoint(self.end()?))
    }
}

/// The two intermediate points between `start` and `end` for `style`.
pub fn control_points(
    start: Point,
    end: Point,
    start_anchor: Anchor,
    style: RoutingStyle,
) -> [Point; 2] {
    match style {
        RoutingStyle::Bezier => bezier_controls(start, end, start_anchor),
        RoutingStyle::Orthogonal => orthogonal_bends(start, end, start_anchor),
    }
}

/// Cubic control points.
///
/// Both sit a third of the straight-line distance away from their end:
/// the first pushed outward from the start anchor's side, the second pulled
/// back from `end` along the dominant axis of travel (horizontal when
/// `|dx| > |dy|`), so the curve leaves and enters perpendicular to the
/// node edges.
fn bezier_controls(start: Point, end: Point, start_anchor: Anchor) -> [Point; 2] {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let reach = dx.hypot(dy) / 3.0;

    let (ox, oy) = start_anchor.outward();
    let first = start.offset(ox * reach, oy * reach);

    let second = if dx.abs() > dy.abs() {
        end.offset(-dx.signum() * reach, 0.0)
    } else {
        end.offset(0.0, -dy.signum() * reach)
    };

    [first, second]
}

/// Elbow bends through the midpoint.
///
/// Normally the connector leaves along the anchor's axis (vertically for
/// top / bottom, horizontally for left / right), turns at the midline
/// between the two ends and turns again onto the target. When the pointer
/// lies behind the anchor (e.g. below a `Top` anchor) the bend axis flips:
/// the connector runs sideways to the perpendicular midline first.
fn orthogonal_bends(start: Point, end: Point, start_anchor: Anchor) -> [Point; 2] {
    let mid = start.midpoint(end);
    let (ox, oy) = start_anchor.outward();
    let ahead = (end.x - start.x) * ox + (end.y - start.y) * oy >= 0.0;

    let leave_vertically = start_anchor.is_vertical() == ahead;

    if leave_vertically {
        [Point::new(start.x, mid.y), Point::new(end.x, mid.y)]
    } else {
        [Point::new(mid.x, start.y), Point::new(mid.x, end.y)]
    }
}
