//! The validated input of the layout engine.

use arcstr::ArcStr;
use indexmap::IndexSet;
use serde::Serialize;

use crate::catalog::{Board, Device};
use crate::connection::Connection;
use crate::error::{CatalogError, Result};

/// A board, the devices attached to it, and the connections between them.
///
/// Devices are laid out, and connections routed, in the order they appear here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    /// The diagram title.
    pub title: ArcStr,
    /// The board.
    pub board: Board,
    /// The attached devices.
    pub devices: Vec<Device>,
    /// The connections to route.
    pub connections: Vec<Connection>,
    /// Whether the renderer should draw a legend.
    pub show_legend: bool,
}

impl Diagram {
    /// Creates a diagram with no devices or connections.
    pub fn new(title: impl Into<ArcStr>, board: Board) -> Self {
        Self {
            title: title.into(),
            board,
            devices: Vec::new(),
            connections: Vec::new(),
            show_legend: false,
        }
    }

    /// Adds a device.
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    /// Adds a connection.
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    /// Sets whether the renderer should draw a legend.
    pub fn with_legend(mut self, show_legend: bool) -> Self {
        self.show_legend = show_legend;
        self
    }

    /// Looks up a device by name.
    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.name() == name)
    }

    /// Checks that device names are unique.
    pub fn check_devices(&self) -> Result<(), CatalogError> {
        check_unique_devices(&self.devices)
    }
}

pub(crate) fn check_unique_devices(devices: &[Device]) -> Result<(), CatalogError> {
    let mut seen = IndexSet::new();
    for device in devices {
        if !seen.insert(device.name()) {
            return Err(CatalogError::DuplicateDevice(device.name().clone()));
        }
    }
    Ok(())
}
