use jobgraph::layout::{NodeBox, NodeTable, Point, Size};
use jobgraph::routing::{
    Anchor, AnchorRef, ConnectorPath, anchor_coordinate, control_points, find_nearest_anchor,
};
use jobgraph::types::RoutingStyle;

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

fn table(nodes: &[(&str, f64, f64)]) -> NodeTable {
    let mut table = NodeTable::new();
    for (id, x, y) in nodes {
        table.insert(*id, NodeBox::new(Point::new(*x, *y), Size::new(100.0, 40.0)));
    }
    table
}

#[test]
fn test_anchor_coordinates_sit_on_edge_midpoints() {
    let node = NodeBox::new(Point::new(100.0, 100.0), Size::new(100.0, 40.0));

    assert_eq!(anchor_coordinate(&node, Anchor::Top), Point::new(100.0, 80.0));
    assert_eq!(anchor_coordinate(&node, Anchor::Bottom), Point::new(100.0, 120.0));
    assert_eq!(anchor_coordinate(&node, Anchor::Left), Point::new(50.0, 100.0));
    assert_eq!(anchor_coordinate(&node, Anchor::Right), Point::new(150.0, 100.0));
}

#[test]
fn test_nearest_anchor_within_radius() {
    let nodes = table(&[("a", 100.0, 100.0)]);

    let found = find_nearest_anchor(&nodes, None, Point::new(148.0, 103.0), 20.0);

    assert_eq!(found, Some(AnchorRef::new("a", Anchor::Right)));
}

#[test]
fn test_snap_radius_is_exclusive() {
    let nodes = table(&[("a", 100.0, 100.0)]);

    assert_eq!(find_nearest_anchor(&nodes, None, Point::new(170.0, 100.0), 20.0), None);
    assert!(find_nearest_anchor(&nodes, None, Point::new(169.9, 100.0), 20.0).is_some());
}

#[test]
fn test_excluded_node_is_never_a_snap_target() {
    let nodes = table(&[("a", 100.0, 100.0)]);

    assert_eq!(
        find_nearest_anchor(&nodes, Some("a"), Point::new(150.0, 100.0), 20.0),
        None
    );
}

#[test]
fn test_equidistant_anchors_resolve_to_first_found() {
    // a.right = (50, 0), b.left = (150, 0); pointer halfway.
    let nodes = table(&[("b", 200.0, 0.0), ("a", 0.0, 0.0)]);

    let found = find_nearest_anchor(&nodes, None, Point::new(100.0, 0.0), 60.0);

    assert_eq!(found, Some(AnchorRef::new("a", Anchor::Right)));
}

#[test]
fn test_bezier_controls_leave_anchor_and_enter_along_dominant_axis() {
    let start = Point::new(0.0, 0.0);
    let end = Point::new(300.0, 100.0);
    let reach = (300.0f64).hypot(100.0) / 3.0;

    let [c1, c2] = control_points(start, end, Anchor::Right, RoutingStyle::Bezier);

    assert!(approx(c1, Point::new(reach, 0.0)));
    assert!(approx(c2, Point::new(300.0 - reach, 100.0)));
}

#[test]
fn test_bezier_vertical_travel_pulls_second_control_vertically() {
    let start = Point::new(0.0, 0.0);
    let end = Point::new(30.0, 300.0);
    let reach = (30.0f64).hypot(300.0) / 3.0;

    let [c1, c2] = control_points(start, end, Anchor::Bottom, RoutingStyle::Bezier);

    assert!(approx(c1, Point::new(0.0, reach)));
    assert!(approx(c2, Point::new(30.0, 300.0 - reach)));
}

#[test]
fn test_orthogonal_bends_follow_anchor_axis() {
    let start = Point::new(0.0, 0.0);

    let right = control_points(start, Point::new(200.0, 100.0), Anchor::Right, RoutingStyle::Orthogonal);
    assert_eq!(right, [Point::new(100.0, 0.0), Point::new(100.0, 100.0)]);

    let bottom = control_points(start, Point::new(50.0, 200.0), Anchor::Bottom, RoutingStyle::Orthogonal);
    assert_eq!(bottom, [Point::new(0.0, 100.0), Point::new(50.0, 100.0)]);
}

#[test]
fn test_orthogonal_bend_axis_flips_when_target_is_behind_anchor() {
    let start = Point::new(0.0, 0.0);

    let top = control_points(start, Point::new(100.0, 200.0), Anchor::Top, RoutingStyle::Orthogonal);
    assert_eq!(top, [Point::new(50.0, 0.0), Point::new(50.0, 200.0)]);

    let right = control_points(start, Point::new(-200.0, 50.0), Anchor::Right, RoutingStyle::Orthogonal);
    assert_eq!(right, [Point::new(0.0, 25.0), Point::new(-200.0, 25.0)]);
}

#[test]
fn test_path_endpoints_arrow_and_handle() {
    let path = ConnectorPath::route(
        Point::new(0.0, 0.0),
        Point::new(200.0, 100.0),
        Anchor::Right,
        RoutingStyle::Orthogonal,
    );

    assert_eq!(path.points.len(), 4);
    assert_eq!(path.start(), Some(Point::new(0.0, 0.0)));
    assert_eq!(path.end(), Some(Point::new(200.0, 100.0)));
    assert_eq!(path.interior().len(), 2);
    assert_eq!(path.arrow_direction(), Some((1.0, 0.0)));
    assert_eq!(path.handle_point(), Some(Point::new(100.0, 50.0)));
}

#[test]
fn test_degenerate_path_has_no_arrow_direction() {
    let p = Point::new(5.0, 5.0);
    let path = ConnectorPath::route(p, p, Anchor::Left, RoutingStyle::Orthogonal);

    assert_eq!(path.arrow_direction(), None);
}

#[test]
fn test_anchor_and_routing_names_parse() {
    assert_eq!("Top".parse::<Anchor>().unwrap(), Anchor::Top);
    assert!("diagonal".parse::<Anchor>().is_err());
    assert_eq!(Anchor::Left.opposite(), Anchor::Right);

    assert_eq!("elbow".parse::<RoutingStyle>().unwrap(), RoutingStyle::Orthogonal);
    assert_eq!("bezier".parse::<RoutingStyle>().unwrap(), RoutingStyle::Bezier);
    assert!("spline".parse::<RoutingStyle>().is_err());
}
