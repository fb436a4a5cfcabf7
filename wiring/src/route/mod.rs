//! Wire routing.
//!
//! Every wire leaves its source pin horizontally, runs along its own vertical
//! rail in the channel between the board and the device column, and enters its
//! destination pin horizontally. Rails are allocated by [`RailPlan`]; the shape
//! drawn through a rail depends on the wire's [`PathStyle`].

use arcstr::ArcStr;
use geometry::prelude::*;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{span, Level};

use crate::config::LayoutConfig;
use crate::connection::{Connection, InlineComponent, PathStyle, Source};
use crate::error::LayoutError;
use crate::layout::{PositionedBoard, PositionedDevice};

pub mod clearance;
pub mod path;
pub mod rails;

pub use clearance::{check_clearance, ClearanceViolation};
pub use rails::{Bundle, RailPlan, Strip};

/// A rounded corner of an orthogonal wire.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Corner {
    /// Where the rounding starts, on the incoming segment.
    pub entry: Point,
    /// The sharp corner being rounded.
    pub vertex: Point,
    /// Where the rounding ends, on the outgoing segment.
    pub exit: Point,
    /// The effective radius.
    pub radius: f64,
}

/// A connection with its resolved geometry.
///
/// Wires are only created by the router, so every path has at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedWire {
    /// Index of the connection this wire was routed from.
    pub connection: usize,
    /// Where the wire starts.
    pub source: Source,
    /// The destination device.
    pub device: ArcStr,
    /// The destination device pin.
    pub device_pin: ArcStr,
    pub(crate) points: Vec<Point>,
    /// The style the path was drawn in.
    pub style: PathStyle,
    /// The strip the wire's rail belongs to.
    pub strip: Strip,
    /// The x-coordinate of the wire's rail.
    pub rail_x: f64,
    /// The radius a renderer should use to round orthogonal corners.
    pub corner_radius: f64,
    /// The wire color.
    pub color: Option<ArcStr>,
    /// The net label.
    pub net: Option<ArcStr>,
    /// Inline components, in order along the wire.
    pub components: Vec<InlineComponent>,
}

impl RoutedWire {
    /// The path, from the source pin to the destination pin.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The first point of the path.
    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The last point of the path.
    #[inline]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// The straight pieces of the path.
    pub fn segments(&self) -> Vec<Segment> {
        self.points.segments()
    }

    /// The length of the path.
    pub fn length(&self) -> f64 {
        self.points.length()
    }

    /// The point at fraction `t` of the path's length.
    pub fn point_at_fraction(&self, t: f64) -> Point {
        self.points
            .point_at_fraction(t)
            .unwrap_or_else(|| self.start())
    }

    /// Where each inline component sits along the path.
    pub fn component_anchors(&self) -> Vec<(&InlineComponent, Point)> {
        self.components
            .iter()
            .map(|component| (component, self.point_at_fraction(component.position)))
            .collect()
    }

    /// The rounded corners of an orthogonal wire.
    ///
    /// The radius at each corner is limited to half of either adjoining
    /// segment, so consecutive roundings never overlap. Other styles have no
    /// corners.
    pub fn corners(&self) -> Vec<Corner> {
        if self.style != PathStyle::Orthogonal || self.corner_radius <= 0. {
            return Vec::new();
        }
        self.points
            .windows(3)
            .filter_map(|w| {
                let (prev, vertex, next) = (w[0], w[1], w[2]);
                let before = prev.dist(vertex);
                let after = vertex.dist(next);
                let radius = self.corner_radius.min(before / 2.).min(after / 2.);
                if radius < geometry::EPSILON {
                    return None;
                }
                Some(Corner {
                    entry: vertex.lerp(prev, radius / before),
                    vertex,
                    exit: vertex.lerp(next, radius / after),
                    radius,
                })
            })
            .collect()
    }
}

/// Routes connections between placed components.
#[derive(Debug, Clone, Copy)]
pub struct WireRouter<'a> {
    config: &'a LayoutConfig,
}

impl<'a> WireRouter<'a> {
    /// Creates a router using the spacing and style defaults of `config`.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Routes every connection, returning one wire per connection in input order.
    ///
    /// Rails start at the board's right edge. Fails if an endpoint cannot be
    /// resolved, or if the result would place two wires closer than
    /// [`LayoutConfig::wire_spacing`].
    pub fn route(
        &self,
        connections: &[Connection],
        board: &PositionedBoard,
        devices: &[PositionedDevice],
    ) -> Result<Vec<RoutedWire>, LayoutError> {
        let plan = RailPlan::new(connections, self.config);
        self.route_with_plan(connections, &plan, board, devices)
    }

    /// Routes `connections` through the rails of `plan`.
    ///
    /// `plan` must have been built from the same connections.
    pub(crate) fn route_with_plan(
        &self,
        connections: &[Connection],
        plan: &RailPlan,
        board: &PositionedBoard,
        devices: &[PositionedDevice],
    ) -> Result<Vec<RoutedWire>, LayoutError> {
        let _guard = span!(Level::INFO, "routing wires", count = connections.len()).entered();

        let devices: IndexMap<&str, &PositionedDevice> = devices
            .iter()
            .map(|device| (device.device.name().as_str(), device))
            .collect();

        let endpoints = connections
            .iter()
            .map(|connection| resolve(connection, board, &devices))
            .collect::<Result<Vec<_>, _>>()?;

        let offsets = plan.lane_offsets(|idx| endpoints[idx].1.y - endpoints[idx].0.y);
        let channel_start = board.bounds.right();

        let wires: Vec<RoutedWire> = connections
            .iter()
            .zip(endpoints)
            .zip(offsets)
            .enumerate()
            .map(|(idx, ((connection, (start, end)), offset))| {
                let rail_x = channel_start + offset;
                let style = connection.style.unwrap_or(self.config.default_style);
                let points =
                    path::synthesize(style, start, end, rail_x, self.config.curve_samples);
                tracing::trace!(
                    source = %connection.source,
                    device = %connection.device,
                    pin = %connection.device_pin,
                    rail_x,
                    "routed wire"
                );
                RoutedWire {
                    connection: idx,
                    source: connection.source.clone(),
                    device: connection.device.clone(),
                    device_pin: connection.device_pin.clone(),
                    points,
                    style,
                    strip: Strip::of(&connection.source),
                    rail_x,
                    corner_radius: self.config.corner_radius,
                    color: connection.color.clone(),
                    net: connection.net.clone(),
                    components: connection.components.clone(),
                }
            })
            .collect();

        if let Some(violation) = check_clearance(&wires, self.config.wire_spacing).first() {
            tracing::error!(
                first = violation.first,
                second = violation.second,
                separation = violation.separation,
                "wire clearance violated"
            );
            return Err(LayoutError::ClearanceViolation {
                first: violation.first,
                second: violation.second,
                separation: violation.separation,
                required: violation.required,
            });
        }

        Ok(wires)
    }
}

/// Routes `connections` with the given configuration.
///
/// Shorthand for [`WireRouter::new`] followed by [`WireRouter::route`].
pub fn route(
    connections: &[Connection],
    board: &PositionedBoard,
    devices: &[PositionedDevice],
    config: &LayoutConfig,
) -> Result<Vec<RoutedWire>, LayoutError> {
    WireRouter::new(config).route(connections, board, devices)
}

fn resolve(
    connection: &Connection,
    board: &PositionedBoard,
    devices: &IndexMap<&str, &PositionedDevice>,
) -> Result<(Point, Point), LayoutError> {
    let start = match &connection.source {
        Source::Board { pin } => board.pin_point(*pin),
        Source::Device { device, pin } => devices
            .get(device.as_str())
            .and_then(|placed| placed.pin_point(pin)),
    }
    .ok_or_else(|| LayoutError::UnresolvedEndpoint(connection.source.to_string().into()))?;

    let end = devices
        .get(connection.device.as_str())
        .and_then(|placed| placed.pin_point(&connection.device_pin))
        .ok_or_else(|| {
            LayoutError::UnresolvedEndpoint(
                format!("{}.{}", connection.device, connection.device_pin).into(),
            )
        })?;

    Ok((start, end))
}
