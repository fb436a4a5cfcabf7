//! Pin assignment and collision-free wire routing for board wiring diagrams.
//!
//! A diagram is produced in three stages:
//!
//! 1. [`assign`] binds each device pin to a board pin according to the pin's
//!    [role](catalog::PinRole).
//! 2. [`connection`] turns those assignments, together with any explicit
//!    connections, into one ordered connection set.
//! 3. [`layout`] places the board and devices and hands the connections to
//!    the [router](route), which gives every wire its own rail so that no two
//!    wires run closer together than the configured spacing.
//!
//! [`auto_wire`] runs all three stages.
//!
//! # Examples
//!
//! ```
//! # use geometry::prelude::*;
//! # use wiring::catalog::{Board, BoardPin, Device, DevicePin, PinRole};
//! # use wiring::config::LayoutConfig;
//! let board = Board::new(
//!     "pico",
//!     60.,
//!     100.,
//!     [
//!         BoardPin::new(1, "3V3", PinRole::Power3v3, Point::new(55., 10.)),
//!         BoardPin::new(2, "GND", PinRole::Ground, Point::new(55., 20.)),
//!     ],
//! )?;
//! let sensor = Device::new(
//!     "sensor",
//!     40.,
//!     30.,
//!     [
//!         DevicePin::new("VCC", PinRole::Power3v3, Point::new(0., 10.)),
//!         DevicePin::new("GND", PinRole::Ground, Point::new(0., 20.)),
//!     ],
//! )?;
//!
//! let wiring = wiring::auto_wire("demo", board, vec![sensor], [], &LayoutConfig::default())?;
//! assert_eq!(wiring.assignments.len(), 2);
//! assert_eq!(wiring.layout.wires.len(), 2);
//! # Ok::<(), wiring::error::Error>(())
//! ```
#![warn(missing_docs)]

use arcstr::ArcStr;
use tracing::{span, Level};

pub mod assign;
pub mod catalog;
pub mod config;
pub mod connection;
pub mod diagram;
pub mod error;
pub mod issues;
pub mod layout;
pub mod route;

#[cfg(test)]
pub(crate) mod tests;

use crate::assign::{PinAssignment, PinAssigner};
use crate::catalog::{Board, Device};
use crate::config::LayoutConfig;
use crate::connection::{Connection, ConnectionBuilder};
use crate::diagram::{check_unique_devices, Diagram};
use crate::error::Result;
use crate::layout::{layout_diagram, DiagramLayout};

/// The output of [`auto_wire`].
#[derive(Debug, Clone)]
pub struct Wiring {
    /// The pin assignments that were made.
    pub assignments: Vec<PinAssignment>,
    /// The routed diagram.
    ///
    /// Its issue set holds every advisory raised along the way: assignment
    /// issues first, then connection issues, then layout issues.
    pub layout: DiagramLayout,
}

/// Assigns pins for `devices`, merges in `explicit` connections, and lays out the result.
///
/// Explicit connections take precedence over assignment: device pins they wire
/// are not assigned, and board pins they drive are not given to exclusive roles.
pub fn auto_wire(
    title: impl Into<ArcStr>,
    board: Board,
    devices: Vec<Device>,
    explicit: impl IntoIterator<Item = Connection>,
    config: &LayoutConfig,
) -> Result<Wiring> {
    let title = title.into();
    let _guard = span!(Level::INFO, "wiring diagram", title = %title).entered();

    check_unique_devices(&devices)?;
    let explicit: Vec<Connection> = explicit.into_iter().collect();
    let assignment = PinAssigner::new(&board)
        .reserve(&explicit)
        .assign(&devices)?;

    let mut builder = ConnectionBuilder::new(&board, &devices);
    builder
        .add_assignments(&assignment.assignments)
        .add_connections(explicit);
    let built = builder.build()?;

    let diagram = Diagram {
        title,
        board,
        devices,
        connections: built.connections,
        show_legend: false,
    };
    let mut layout = layout_diagram(&diagram, config)?;

    let mut issues = assignment.issues;
    issues.extend(built.issues);
    issues.extend(std::mem::take(&mut layout.issues));
    layout.issues = issues;

    Ok(Wiring {
        assignments: assignment.assignments,
        layout,
    })
}
