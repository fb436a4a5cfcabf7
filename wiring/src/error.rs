//! Error types and error handling utilities.

use std::sync::Arc;

use arcstr::ArcStr;

use crate::catalog::PinRole;

/// A result type returning wiring errors.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for wiring functions.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// An invalid board or device definition.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A pin request that cannot be satisfied.
    #[error(transparent)]
    Assign(#[from] AssignError),
    /// A malformed or dangling connection.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    /// A layout that could not be produced.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// An invalid layout configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An invalid board or device definition.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two board pins share a number.
    #[error("board `{board}` declares pin {number} more than once")]
    DuplicateBoardPin {
        /// The board name.
        board: ArcStr,
        /// The repeated pin number.
        number: u32,
    },
    /// Two device pins share a name.
    #[error("device `{device}` declares pin `{pin}` more than once")]
    DuplicateDevicePin {
        /// The device name.
        device: ArcStr,
        /// The repeated pin name.
        pin: ArcStr,
    },
    /// A pin lies outside the footprint of its board or device.
    #[error("pin `{pin}` lies outside the footprint of `{owner}`")]
    PinOutsideFootprint {
        /// The board or device name.
        owner: ArcStr,
        /// The offending pin.
        pin: ArcStr,
    },
    /// A board or device has a non-positive or non-finite size.
    #[error("`{owner}` has an invalid size of {width} x {height}")]
    InvalidFootprint {
        /// The board or device name.
        owner: ArcStr,
        /// The declared width.
        width: f64,
        /// The declared height.
        height: f64,
    },
    /// Two devices share a name.
    #[error("device name `{0}` is used more than once")]
    DuplicateDevice(ArcStr),
}

/// A pin request that cannot be satisfied by the board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// The board has no pin carrying the requested role.
    #[error("no board pin provides role {role} required by pin `{pin}` of device `{device}`")]
    NoCandidate {
        /// The requesting device.
        device: ArcStr,
        /// The requesting device pin.
        pin: ArcStr,
        /// The requested role.
        role: PinRole,
    },
    /// Every board pin carrying an exclusive role is already in use.
    #[error("all {role} board pins are in use; none left for pin `{pin}` of device `{device}`")]
    Exhausted {
        /// The requesting device.
        device: ArcStr,
        /// The requesting device pin.
        pin: ArcStr,
        /// The requested role.
        role: PinRole,
    },
}

/// A malformed or dangling connection.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConnectionError {
    /// Both a board pin and a source device were given.
    #[error("connection to `{device}.{pin}` specifies both a board pin and a source device")]
    AmbiguousSource {
        /// The destination device.
        device: ArcStr,
        /// The destination pin.
        pin: ArcStr,
    },
    /// Neither a board pin nor a source device was given.
    #[error("connection to `{device}.{pin}` specifies neither a board pin nor a source device")]
    MissingSource {
        /// The destination device.
        device: ArcStr,
        /// The destination pin.
        pin: ArcStr,
    },
    /// Only one of the source device and source pin was given.
    #[error("connection to `{device}.{pin}` must name both a source device and a source pin")]
    IncompleteDeviceSource {
        /// The destination device.
        device: ArcStr,
        /// The destination pin.
        pin: ArcStr,
    },
    /// An inline component lies outside the wire.
    #[error("inline component on `{device}.{pin}` has position {position}, expected a value in [0, 1]")]
    ComponentPosition {
        /// The destination device.
        device: ArcStr,
        /// The destination pin.
        pin: ArcStr,
        /// The offending position.
        position: f64,
    },
    /// A connection references a device that is not in the diagram.
    #[error("connection references unknown device `{0}`")]
    UnknownDevice(ArcStr),
    /// A connection references a pin that its device does not have.
    #[error("device `{device}` has no pin named `{pin}`")]
    UnknownDevicePin {
        /// The device.
        device: ArcStr,
        /// The missing pin.
        pin: ArcStr,
    },
    /// A connection references a board pin that does not exist.
    #[error("board `{board}` has no pin {number}")]
    UnknownBoardPin {
        /// The board.
        board: ArcStr,
        /// The missing pin number.
        number: u32,
    },
}

/// An error produced while laying out a diagram.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The diagram has more connections than the configured maximum.
    #[error("diagram has {count} connections, exceeding maximum of {max}")]
    TooManyConnections {
        /// The number of connections in the diagram.
        count: usize,
        /// The configured maximum.
        max: usize,
    },
    /// The diagram has more devices than the configured maximum.
    #[error("diagram has {count} devices, exceeding maximum of {max}")]
    TooManyDevices {
        /// The number of devices in the diagram.
        count: usize,
        /// The configured maximum.
        max: usize,
    },
    /// A connection endpoint could not be located.
    #[error("cannot locate endpoint `{0}`")]
    UnresolvedEndpoint(ArcStr),
    /// Two routed wires run closer together than allowed.
    #[error("wires {first} and {second} run {separation} apart, closer than the required {required}")]
    ClearanceViolation {
        /// The index of the first wire.
        first: usize,
        /// The index of the second wire.
        second: usize,
        /// The measured separation.
        separation: f64,
        /// The required separation.
        required: f64,
    },
}

/// An invalid layout configuration.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] Arc<std::io::Error>),
    /// The configuration could not be parsed as TOML.
    #[error("could not parse layout config: {0}")]
    Parse(#[from] Arc<toml::de::Error>),
    /// A configuration value is out of range.
    #[error("invalid layout config: `{field}` {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(Arc::new(value))
    }
}
