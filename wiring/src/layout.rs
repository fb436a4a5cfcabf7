//! Placement of the board and devices, and assembly of the final layout.
//!
//! The board sits at `(board_margin, board_margin)`. Wires are routed through
//! a channel that starts at the board's right edge, and devices are stacked
//! vertically, in input order, in a column to the right of that channel.

use arcstr::ArcStr;
use geometry::prelude::*;
use serde::Serialize;
use tracing::{span, Level};

use crate::catalog::{Board, Device};
use crate::config::LayoutConfig;
use crate::diagram::Diagram;
use crate::error::{LayoutError, Result};
use crate::issues::{Cause, IssueSet, LayoutIssue, Severity};
use crate::route::{RailPlan, RoutedWire, WireRouter};

/// A board with its position on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedBoard {
    /// The board.
    pub board: Board,
    /// The board footprint on the canvas.
    pub bounds: Rect,
}

impl PositionedBoard {
    /// The canvas location of board pin `number`.
    pub fn pin_point(&self, number: u32) -> Option<Point> {
        self.board
            .pin(number)
            .map(|pin| self.bounds.origin() + pin.position)
    }
}

/// A device with its position on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedDevice {
    /// The device.
    pub device: Device,
    /// The device footprint on the canvas.
    pub bounds: Rect,
}

impl PositionedDevice {
    /// The canvas location of the device pin called `name`.
    pub fn pin_point(&self, name: &str) -> Option<Point> {
        self.device
            .pin(name)
            .map(|pin| self.bounds.origin() + pin.position)
    }
}

/// A fully placed and routed diagram, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramLayout {
    /// The diagram title.
    pub title: ArcStr,
    /// Whether the renderer should draw a legend.
    pub show_legend: bool,
    /// The placed board.
    pub board: PositionedBoard,
    /// The placed devices, in input order.
    pub devices: Vec<PositionedDevice>,
    /// The routed wires, in connection order.
    pub wires: Vec<RoutedWire>,
    /// Advisories raised while laying out the diagram.
    pub issues: IssueSet<LayoutIssue>,
}

impl DiagramLayout {
    /// Looks up a placed device by name.
    pub fn device(&self, name: &str) -> Option<&PositionedDevice> {
        self.devices.iter().find(|device| device.device.name() == name)
    }

    /// The smallest rectangle containing every placed component and wire point.
    pub fn bounds(&self) -> Rect {
        let components = self
            .devices
            .iter()
            .fold(self.board.bounds, |acc, device| acc.union(&device.bounds));
        self.wires
            .iter()
            .flat_map(|wire| wire.points().iter())
            .fold(components, |acc, point| acc.union(&Rect::new(*point, *point)))
    }
}

/// Places components and routes wires.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    /// Creates an engine using `config`.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Checks the diagram against the configured complexity limits.
    ///
    /// Exceeding a hard cap is an error. Exceeding a warning threshold yields a
    /// warning in the returned set.
    pub fn check_complexity(&self, diagram: &Diagram) -> Result<IssueSet<LayoutIssue>, LayoutError> {
        let connections = diagram.connections.len();
        let devices = diagram.devices.len();

        if let Some(max) = self.config.max_connections {
            if connections > max {
                return Err(LayoutError::TooManyConnections {
                    count: connections,
                    max,
                });
            }
        }
        if let Some(max) = self.config.max_devices {
            if devices > max {
                return Err(LayoutError::TooManyDevices {
                    count: devices,
                    max,
                });
            }
        }

        let mut issues = IssueSet::new();
        if let Some(threshold) = self.config.warn_connections {
            if connections > threshold {
                issues.add(LayoutIssue::new_and_log(
                    Cause::ConnectionsAboveThreshold {
                        count: connections,
                        threshold,
                    },
                    Severity::Warning,
                ));
            }
        }
        if let Some(threshold) = self.config.warn_devices {
            if devices > threshold {
                issues.add(LayoutIssue::new_and_log(
                    Cause::DevicesAboveThreshold {
                        count: devices,
                        threshold,
                    },
                    Severity::Warning,
                ));
            }
        }
        Ok(issues)
    }

    /// Places the board and devices, leaving a routing channel `channel_width` wide.
    pub fn place(&self, diagram: &Diagram, channel_width: f64) -> (PositionedBoard, Vec<PositionedDevice>) {
        let margin = self.config.board_margin;
        let board = PositionedBoard {
            board: diagram.board.clone(),
            bounds: Rect::from_xywh(
                margin,
                margin,
                diagram.board.width(),
                diagram.board.height(),
            ),
        };

        let column = board.bounds.right() + self.config.device_offset_x.max(channel_width);
        let mut top = board.bounds.top();
        let devices = diagram
            .devices
            .iter()
            .map(|device| {
                let bounds = Rect::from_xywh(column, top, device.width(), device.height());
                top = bounds.bot() + self.config.device_spacing_vertical;
                PositionedDevice {
                    device: device.clone(),
                    bounds,
                }
            })
            .collect();

        (board, devices)
    }

    /// Lays out `diagram`.
    ///
    /// The complexity limits are checked before any geometry is computed.
    pub fn layout(&self, diagram: &Diagram) -> Result<DiagramLayout> {
        let _guard = span!(Level::INFO, "laying out diagram", title = %diagram.title).entered();

        self.config.validate()?;
        diagram.check_devices()?;
        let issues = self.check_complexity(diagram)?;

        let plan = RailPlan::new(&diagram.connections, self.config);
        let (board, devices) = self.place(diagram, plan.width());
        tracing::debug!(
            channel_width = plan.width(),
            bundles = plan.bundles().len(),
            "placed components"
        );

        let wires = WireRouter::new(self.config).route_with_plan(
            &diagram.connections,
            &plan,
            &board,
            &devices,
        )?;

        Ok(DiagramLayout {
            title: diagram.title.clone(),
            show_legend: diagram.show_legend,
            board,
            devices,
            wires,
            issues,
        })
    }
}

/// Lays out `diagram` with the given configuration.
///
/// Shorthand for [`LayoutEngine::new`] followed by [`LayoutEngine::layout`].
pub fn layout_diagram(diagram: &Diagram, config: &LayoutConfig) -> Result<DiagramLayout> {
    LayoutEngine::new(config).layout(diagram)
}
