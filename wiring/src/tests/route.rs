use approx::assert_relative_eq;
use geometry::prelude::*;
use test_log::test;

use super::{device, header_board, i2c_sensor};
use crate::catalog::PinRole;
use crate::config::LayoutConfig;
use crate::connection::{ComponentKind, Connection, InlineComponent, PathStyle, Source};
use crate::diagram::Diagram;
use crate::layout::layout_diagram;
use crate::route::path::synthesize;
use crate::error::LayoutError;
use crate::route::{check_clearance, route, RailPlan, RoutedWire, Strip};

fn wire(connection: usize, points: Vec<Point>) -> RoutedWire {
    RoutedWire {
        connection,
        source: Source::Board { pin: 1 },
        device: "dev".into(),
        device_pin: "P".into(),
        points,
        style: PathStyle::Orthogonal,
        strip: Strip::Board,
        rail_x: 0.,
        corner_radius: 5.,
        color: None,
        net: None,
        components: Vec::new(),
    }
}

fn ground_fan_out() -> Diagram {
    Diagram::new("fan-out", header_board())
        .with_device(i2c_sensor("a"))
        .with_device(i2c_sensor("b"))
        .with_device(i2c_sensor("c"))
        .with_connection(Connection::from_board(1, "a", "VCC"))
        .with_connection(Connection::from_board(6, "a", "GND"))
        .with_connection(Connection::from_board(6, "b", "GND"))
        .with_connection(Connection::from_board(6, "c", "GND"))
}

#[test]
fn rail_plan_groups_bundles() {
    let config = LayoutConfig::default();
    let diagram = ground_fan_out();
    let plan = RailPlan::new(&diagram.connections, &config);

    let bundles = plan.bundles();
    assert_eq!(bundles.len(), 2);
    assert_eq!(bundles[0].source, Source::Board { pin: 1 });
    assert_eq!(bundles[0].members, [0]);
    assert_eq!(bundles[0].offset, 12.);
    assert_eq!(bundles[1].source, Source::Board { pin: 6 });
    assert_eq!(bundles[1].members, [1, 2, 3]);
    assert_eq!(bundles[1].offset, 24.);
    assert_eq!(plan.width(), 52.);
}

#[test]
fn empty_rail_plan_has_no_width() {
    let plan = RailPlan::new(&[], &LayoutConfig::default());
    assert!(plan.bundles().is_empty());
    assert_eq!(plan.width(), 0.);
}

#[test]
fn routing_placed_components_matches_layout() {
    let config = LayoutConfig::default();
    let diagram =
        ground_fan_out().with_connection(Connection::from_device("a", "SDA", "b", "SDA"));
    let layout = layout_diagram(&diagram, &config).unwrap();

    let wires = route(&diagram.connections, &layout.board, &layout.devices, &config).unwrap();
    assert_eq!(wires, layout.wires);
    for wire in wires.iter() {
        assert!(wire.points().len() >= 2);
        assert_eq!(wire.start(), wire.points()[0]);
        assert_eq!(Some(&wire.end()), wire.points().last());
    }

    assert!(matches!(
        route(&diagram.connections, &layout.board, &[], &config),
        Err(LayoutError::UnresolvedEndpoint(_))
    ));
}

#[test]
fn bundled_wires_fan_out() {
    let config = LayoutConfig::default();
    let layout = layout_diagram(&ground_fan_out(), &config).unwrap();

    let mut rails: Vec<f64> = layout.wires[1..].iter().map(|w| w.rail_x).collect();
    rails.sort_by(f64::total_cmp);
    assert_eq!(rails.len(), 3);
    assert!(rails[0] < rails[1] && rails[1] < rails[2]);
    assert_relative_eq!(rails[1] - rails[0], config.bundle_pitch());
    assert_relative_eq!(rails[2] - rails[1], config.bundle_pitch());

    // The farthest destination takes the lane nearest the board.
    let board_right = layout.board.bounds.right();
    assert_relative_eq!(layout.wires[3].rail_x, board_right + 24.);
    assert_relative_eq!(layout.wires[1].rail_x, board_right + 32.);
    assert_relative_eq!(layout.wires[2].rail_x, board_right + 40.);

    assert!(check_clearance(&layout.wires, config.wire_spacing).is_empty());
}

#[test]
fn bundle_lanes_follow_reach() {
    let board = super::board("tall", &[(10, PinRole::Ground)]);
    let diagram = Diagram::new("reach", board)
        .with_device(device("upper", &[("GND", PinRole::Ground)]))
        .with_device(device("lower", &[("GND", PinRole::Ground)]))
        .with_connection(Connection::from_board(10, "lower", "GND"))
        .with_connection(Connection::from_board(10, "upper", "GND"));
    let config = LayoutConfig::default();
    let layout = layout_diagram(&diagram, &config).unwrap();

    let lower = &layout.wires[0];
    let upper = &layout.wires[1];
    let reach = |w: &RoutedWire| (w.end().y - w.start().y).abs();
    assert!(reach(upper) > reach(lower));
    assert!(upper.rail_x < lower.rail_x);
    assert_relative_eq!(lower.rail_x - upper.rail_x, config.bundle_pitch());
    assert!(check_clearance(&layout.wires, config.wire_spacing).is_empty());
}

#[test]
fn device_strip_follows_board_strip() {
    let diagram = ground_fan_out()
        .with_connection(Connection::from_device("a", "SDA", "b", "SDA"))
        .with_connection(Connection::from_board(3, "c", "SDA"));
    let config = LayoutConfig::default();
    let layout = layout_diagram(&diagram, &config).unwrap();

    let device_wire = &layout.wires[4];
    assert_eq!(device_wire.strip, Strip::Device);
    for wire in layout.wires.iter().filter(|w| w.strip == Strip::Board) {
        assert!(wire.rail_x < device_wire.rail_x);
    }

    // The device column clears every rail.
    let column = layout.devices[0].bounds.left();
    for wire in layout.wires.iter() {
        assert!(wire.rail_x < column);
    }
}

#[test]
fn orthogonal_paths() {
    let s = Point::new(0., 10.);
    let d = Point::new(100., 50.);
    let points = synthesize(PathStyle::Orthogonal, s, d, 40., 16);
    assert_eq!(
        points,
        [s, Point::new(40., 10.), Point::new(40., 50.), d]
    );
    for segment in points.segments() {
        assert!(segment.dir().is_some());
    }
}

#[test]
fn straight_and_curved_paths() {
    let s = Point::new(0., 10.);
    let d = Point::new(100., 50.);

    let straight = synthesize(PathStyle::Straight, s, d, 40., 16);
    assert_eq!(straight, [s, Point::new(40., 30.), d]);

    let curved = synthesize(PathStyle::Curved, s, d, 40., 16);
    assert_eq!(curved.len(), 17);
    assert_eq!(curved[0], s);
    assert_eq!(curved[16], d);
    assert_relative_eq!(curved[8].y, 30.);
}

#[test]
fn level_endpoints_connect_directly() {
    let s = Point::new(0., 10.);
    let d = Point::new(100., 10.);
    for style in [PathStyle::Straight, PathStyle::Curved, PathStyle::Orthogonal] {
        assert_eq!(synthesize(style, s, d, 40., 16), [s, d]);
    }
}

#[test]
fn corners_are_clamped_to_short_segments() {
    let w = wire(
        0,
        vec![
            Point::new(0., 0.),
            Point::new(20., 0.),
            Point::new(20., 4.),
            Point::new(40., 4.),
        ],
    );
    let corners = w.corners();
    assert_eq!(corners.len(), 2);
    assert_relative_eq!(corners[0].radius, 2.);
    assert_eq!(corners[0].vertex, Point::new(20., 0.));
    assert_relative_eq!(corners[0].entry, Point::new(18., 0.));
    assert_relative_eq!(corners[0].exit, Point::new(20., 2.));
    assert_relative_eq!(corners[1].radius, 2.);

    let mut curved = w.clone();
    curved.style = PathStyle::Curved;
    assert!(curved.corners().is_empty());
}

#[test]
fn components_anchor_along_the_wire() {
    let mut w = wire(
        0,
        vec![Point::new(0., 0.), Point::new(30., 0.), Point::new(30., 10.)],
    );
    w.components = vec![
        InlineComponent::new(ComponentKind::Resistor, 0.5).with_value("1k"),
        InlineComponent::new(ComponentKind::Diode, 1.),
    ];
    assert_relative_eq!(w.length(), 40.);

    let anchors = w.component_anchors();
    assert_eq!(anchors.len(), 2);
    assert_eq!(anchors[0].0.kind, ComponentKind::Resistor);
    assert_relative_eq!(anchors[0].1, Point::new(20., 0.));
    assert_relative_eq!(anchors[1].1, Point::new(30., 10.));
}

#[test]
fn clearance_violations_are_detected() {
    let a = wire(
        0,
        vec![
            Point::new(0., 0.),
            Point::new(50., 0.),
            Point::new(50., 100.),
            Point::new(80., 100.),
        ],
    );
    let b = wire(
        1,
        vec![
            Point::new(0., 20.),
            Point::new(53., 20.),
            Point::new(53., 60.),
            Point::new(80., 60.),
        ],
    );
    let violations = check_clearance(&[a.clone(), b], 8.);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].first, 0);
    assert_eq!(violations[0].second, 1);
    assert_relative_eq!(violations[0].separation, 3.);

    let c = wire(
        1,
        vec![
            Point::new(0., 20.),
            Point::new(58., 20.),
            Point::new(58., 60.),
            Point::new(80., 60.),
        ],
    );
    assert!(check_clearance(&[a, c], 8.).is_empty());
}

#[test]
fn terminal_segments_may_meet() {
    // Two wires leaving the same pin share their first segment.
    let a = wire(
        0,
        vec![
            Point::new(0., 0.),
            Point::new(50., 0.),
            Point::new(50., 100.),
            Point::new(80., 100.),
        ],
    );
    let b = wire(
        1,
        vec![
            Point::new(0., 0.),
            Point::new(58., 0.),
            Point::new(58., 60.),
            Point::new(80., 60.),
        ],
    );
    assert!(check_clearance(&[a, b], 8.).is_empty());
}
