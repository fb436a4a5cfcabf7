//! Connections between board pins and device pins.
//!
//! A [`ConnectionSpec`] mirrors what a configuration document provides: the
//! source is given either as a board pin or as a device pin, through optional
//! fields. Converting it into a [`Connection`] checks that exactly one source
//! form is present, so a [`Connection`] always has a well-formed [`Source`].

use std::fmt::Display;

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{span, Level};

use crate::assign::PinAssignment;
use crate::catalog::{Board, Device};
use crate::error::{ConnectionError, Result};
use crate::issues::{Cause, IssueSet, LayoutIssue, Severity};

/// How a wire's path is drawn.
#[derive(
    Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// Straight lines through the wire's rail.
    Straight,
    /// A smooth curve bent toward the wire's rail.
    Curved,
    /// Horizontal and vertical segments only.
    #[default]
    Orthogonal,
}

/// The kind of an inline component drawn on a wire.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A resistor.
    Resistor,
    /// A capacitor.
    Capacitor,
    /// A diode.
    Diode,
}

/// A component marker placed along a wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineComponent {
    /// The kind of component.
    pub kind: ComponentKind,
    /// An optional value label, e.g. `220Ω`.
    #[serde(default)]
    pub value: Option<ArcStr>,
    /// Where the component sits, as a fraction of the wire's length.
    pub position: f64,
}

impl InlineComponent {
    /// Creates a component at `position` along the wire.
    pub fn new(kind: ComponentKind, position: f64) -> Self {
        Self {
            kind,
            value: None,
            position,
        }
    }

    /// Sets the value label of the component.
    pub fn with_value(mut self, value: impl Into<ArcStr>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Where a connection starts.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Source {
    /// A board pin, by number.
    Board {
        /// The board pin number.
        pin: u32,
    },
    /// A pin of another device.
    Device {
        /// The source device.
        device: ArcStr,
        /// The source device pin.
        pin: ArcStr,
    },
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board { pin } => write!(f, "board pin {}", pin),
            Self::Device { device, pin } => write!(f, "{}.{}", device, pin),
        }
    }
}

/// A connection as written in a configuration document.
///
/// Exactly one of `board_pin` or the pair (`source_device`, `source_pin`)
/// must be given. Use [`Connection::try_from`] to check this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSpec {
    /// The source board pin.
    pub board_pin: Option<u32>,
    /// The source device.
    pub source_device: Option<ArcStr>,
    /// The source device pin.
    pub source_pin: Option<ArcStr>,
    /// The destination device.
    pub device: ArcStr,
    /// The destination device pin.
    pub device_pin: ArcStr,
    /// The wire color.
    pub color: Option<ArcStr>,
    /// The path style, if different from the layout default.
    pub style: Option<PathStyle>,
    /// The net label.
    pub net: Option<ArcStr>,
    /// Inline components, in order along the wire.
    pub components: Vec<InlineComponent>,
}

/// A validated connection from a board or device pin to a device pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Where the connection starts.
    pub source: Source,
    /// The destination device.
    pub device: ArcStr,
    /// The destination device pin.
    pub device_pin: ArcStr,
    /// The wire color.
    pub color: Option<ArcStr>,
    /// The path style, if different from the layout default.
    pub style: Option<PathStyle>,
    /// The net label.
    pub net: Option<ArcStr>,
    /// Inline components, in order along the wire.
    pub components: Vec<InlineComponent>,
}

impl Connection {
    /// Creates a connection from board pin `pin` to `device.device_pin`.
    pub fn from_board(pin: u32, device: impl Into<ArcStr>, device_pin: impl Into<ArcStr>) -> Self {
        Self::new(Source::Board { pin }, device.into(), device_pin.into())
    }

    /// Creates a connection from `source_device.source_pin` to `device.device_pin`.
    pub fn from_device(
        source_device: impl Into<ArcStr>,
        source_pin: impl Into<ArcStr>,
        device: impl Into<ArcStr>,
        device_pin: impl Into<ArcStr>,
    ) -> Self {
        Self::new(
            Source::Device {
                device: source_device.into(),
                pin: source_pin.into(),
            },
            device.into(),
            device_pin.into(),
        )
    }

    fn new(source: Source, device: ArcStr, device_pin: ArcStr) -> Self {
        Self {
            source,
            device,
            device_pin,
            color: None,
            style: None,
            net: None,
            components: Vec::new(),
        }
    }

    /// Sets the wire color.
    pub fn with_color(mut self, color: impl Into<ArcStr>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the path style.
    pub fn with_style(mut self, style: PathStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the net label.
    pub fn with_net(mut self, net: impl Into<ArcStr>) -> Self {
        self.net = Some(net.into());
        self
    }

    /// Appends an inline component.
    pub fn with_component(mut self, component: InlineComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Returns `true` if the connection starts at a board pin.
    #[inline]
    pub fn is_board_sourced(&self) -> bool {
        matches!(self.source, Source::Board { .. })
    }

    /// Checks inline component positions.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        for component in self.components.iter() {
            if !(0. ..=1.).contains(&component.position) {
                return Err(ConnectionError::ComponentPosition {
                    device: self.device.clone(),
                    pin: self.device_pin.clone(),
                    position: component.position,
                });
            }
        }
        Ok(())
    }

    /// Checks that every pin this connection references exists.
    pub fn check_references(&self, board: &Board, devices: &[Device]) -> Result<(), ConnectionError> {
        match &self.source {
            Source::Board { pin } => {
                if board.pin(*pin).is_none() {
                    return Err(ConnectionError::UnknownBoardPin {
                        board: board.name().clone(),
                        number: *pin,
                    });
                }
            }
            Source::Device { device, pin } => check_device_pin(devices, device, pin)?,
        }
        check_device_pin(devices, &self.device, &self.device_pin)
    }
}

impl TryFrom<ConnectionSpec> for Connection {
    type Error = ConnectionError;

    fn try_from(raw: ConnectionSpec) -> Result<Self, Self::Error> {
        let source = match (raw.board_pin, raw.source_device, raw.source_pin) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ConnectionError::AmbiguousSource {
                    device: raw.device,
                    pin: raw.device_pin,
                })
            }
            (Some(pin), None, None) => Source::Board { pin },
            (None, Some(device), Some(pin)) => Source::Device { device, pin },
            (None, None, None) => {
                return Err(ConnectionError::MissingSource {
                    device: raw.device,
                    pin: raw.device_pin,
                })
            }
            (None, _, _) => {
                return Err(ConnectionError::IncompleteDeviceSource {
                    device: raw.device,
                    pin: raw.device_pin,
                })
            }
        };

        let connection = Self {
            source,
            device: raw.device,
            device_pin: raw.device_pin,
            color: raw.color,
            style: raw.style,
            net: raw.net,
            components: raw.components,
        };
        connection.validate()?;
        Ok(connection)
    }
}

fn check_device_pin(devices: &[Device], device: &ArcStr, pin: &ArcStr) -> Result<(), ConnectionError> {
    let found = devices
        .iter()
        .find(|d| d.name() == device)
        .ok_or_else(|| ConnectionError::UnknownDevice(device.clone()))?;
    if found.pin(pin).is_none() {
        return Err(ConnectionError::UnknownDevicePin {
            device: device.clone(),
            pin: pin.clone(),
        });
    }
    Ok(())
}

/// The connection set produced by a [`ConnectionBuilder`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionSet {
    /// The connections, in the order they will be routed.
    pub connections: Vec<Connection>,
    /// Advisories raised while merging.
    pub issues: IssueSet<LayoutIssue>,
}

/// Merges pin assignments and explicit connections into one connection set.
///
/// Assigned connections come first, in assignment order. Explicit connections
/// follow in the order they were added. An explicit connection that targets a
/// device pin which already received an assigned connection replaces it.
pub struct ConnectionBuilder<'a> {
    board: &'a Board,
    devices: &'a [Device],
    connections: IndexMap<(ArcStr, ArcStr), Connection>,
    issues: IssueSet<LayoutIssue>,
}

impl<'a> ConnectionBuilder<'a> {
    /// Creates an empty builder for the given board and devices.
    pub fn new(board: &'a Board, devices: &'a [Device]) -> Self {
        Self {
            board,
            devices,
            connections: IndexMap::new(),
            issues: IssueSet::new(),
        }
    }

    /// Adds one board-sourced connection per assignment.
    ///
    /// Wires of roles that name a net are labelled with it.
    pub fn add_assignments<'b>(
        &mut self,
        assignments: impl IntoIterator<Item = &'b PinAssignment>,
    ) -> &mut Self {
        for assignment in assignments {
            let mut connection = Connection::from_board(
                assignment.board_pin,
                assignment.device.clone(),
                assignment.device_pin.clone(),
            );
            connection.net = assignment.role.net_label().map(ArcStr::from);
            self.connections.insert(
                (assignment.device.clone(), assignment.device_pin.clone()),
                connection,
            );
        }
        self
    }

    /// Adds an explicit connection.
    pub fn add_connection(&mut self, connection: Connection) -> &mut Self {
        let key = (connection.device.clone(), connection.device_pin.clone());
        if self.connections.shift_remove(&key).is_some() {
            self.issues.add(LayoutIssue::new_and_log(
                Cause::ConnectionOverridden {
                    device: key.0.clone(),
                    device_pin: key.1.clone(),
                },
                Severity::Info,
            ));
        }
        self.connections.insert(key, connection);
        self
    }

    /// Adds several explicit connections.
    pub fn add_connections(&mut self, connections: impl IntoIterator<Item = Connection>) -> &mut Self {
        for connection in connections {
            self.add_connection(connection);
        }
        self
    }

    /// Checks every connection and returns the merged set.
    pub fn build(self) -> Result<ConnectionSet, ConnectionError> {
        let _guard = span!(Level::INFO, "building connections").entered();
        let connections: Vec<Connection> = self.connections.into_values().collect();
        for connection in connections.iter() {
            connection.validate()?;
            connection.check_references(self.board, self.devices)?;
        }
        tracing::debug!(count = connections.len(), "built connections");
        Ok(ConnectionSet {
            connections,
            issues: self.issues,
        })
    }
}
