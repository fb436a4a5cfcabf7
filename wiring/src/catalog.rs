//! Board and device pin catalogs.
//!
//! Boards and devices are built once per diagram and never mutated afterward.
//! Board pin positions are relative to the board's top-left corner;
//! device pin positions are relative to the device's top-left corner.

use std::fmt::Display;

use arcstr::ArcStr;
use geometry::prelude::*;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The electrical function of a pin.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PinRole {
    /// 3.3 V supply.
    #[serde(rename = "POWER_3V3")]
    Power3v3,
    /// 5 V supply.
    #[serde(rename = "POWER_5V")]
    Power5v,
    /// Ground.
    #[serde(rename = "GROUND")]
    Ground,
    /// I2C data line.
    #[serde(rename = "I2C_SDA")]
    I2cSda,
    /// I2C clock line.
    #[serde(rename = "I2C_SCL")]
    I2cScl,
    /// SPI controller-out line.
    #[serde(rename = "SPI_MOSI")]
    SpiMosi,
    /// SPI controller-in line.
    #[serde(rename = "SPI_MISO")]
    SpiMiso,
    /// SPI clock line.
    #[serde(rename = "SPI_SCLK")]
    SpiSclk,
    /// SPI chip select 0.
    #[serde(rename = "SPI_CE0")]
    SpiCe0,
    /// SPI chip select 1.
    #[serde(rename = "SPI_CE1")]
    SpiCe1,
    /// UART transmit.
    #[serde(rename = "UART_TX")]
    UartTx,
    /// UART receive.
    #[serde(rename = "UART_RX")]
    UartRx,
    /// Hardware PWM output.
    #[serde(rename = "PWM")]
    Pwm,
    /// General-purpose I/O.
    #[serde(rename = "GPIO")]
    Gpio,
    /// A pin with no board-side meaning; only wired explicitly.
    #[serde(rename = "generic")]
    Generic,
}

/// How requests for a [`PinRole`] are mapped onto board pins.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum AssignmentPolicy {
    /// Every requester is bound to the same canonical board pin.
    Shared,
    /// Requesters cycle through all board pins carrying the role.
    RoundRobin,
    /// Each board pin is bound at most once.
    Exclusive,
    /// The pin is never bound to a board pin automatically.
    Unassigned,
}

impl PinRole {
    /// Every role, in declaration order.
    pub const ALL: [PinRole; 15] = [
        Self::Power3v3,
        Self::Power5v,
        Self::Ground,
        Self::I2cSda,
        Self::I2cScl,
        Self::SpiMosi,
        Self::SpiMiso,
        Self::SpiSclk,
        Self::SpiCe0,
        Self::SpiCe1,
        Self::UartTx,
        Self::UartRx,
        Self::Pwm,
        Self::Gpio,
        Self::Generic,
    ];

    /// The assignment policy for this role.
    pub const fn policy(&self) -> AssignmentPolicy {
        match *self {
            Self::I2cSda | Self::I2cScl | Self::SpiMosi | Self::SpiMiso | Self::SpiSclk => {
                AssignmentPolicy::Shared
            }
            Self::Power3v3 | Self::Power5v | Self::Ground => AssignmentPolicy::RoundRobin,
            Self::SpiCe0 | Self::SpiCe1 | Self::UartTx | Self::UartRx | Self::Pwm | Self::Gpio => {
                AssignmentPolicy::Exclusive
            }
            Self::Generic => AssignmentPolicy::Unassigned,
        }
    }

    /// The canonical identifier of this role, e.g. `I2C_SDA`.
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Power3v3 => "POWER_3V3",
            Self::Power5v => "POWER_5V",
            Self::Ground => "GROUND",
            Self::I2cSda => "I2C_SDA",
            Self::I2cScl => "I2C_SCL",
            Self::SpiMosi => "SPI_MOSI",
            Self::SpiMiso => "SPI_MISO",
            Self::SpiSclk => "SPI_SCLK",
            Self::SpiCe0 => "SPI_CE0",
            Self::SpiCe1 => "SPI_CE1",
            Self::UartTx => "UART_TX",
            Self::UartRx => "UART_RX",
            Self::Pwm => "PWM",
            Self::Gpio => "GPIO",
            Self::Generic => "generic",
        }
    }

    /// The label of the net a wire of this role belongs to, if the role names one.
    ///
    /// Plain GPIO, PWM, and generic pins carry no net label.
    pub const fn net_label(&self) -> Option<&'static str> {
        match *self {
            Self::Power3v3 => Some("3V3"),
            Self::Power5v => Some("5V"),
            Self::Ground => Some("GND"),
            Self::Pwm | Self::Gpio | Self::Generic => None,
            other => Some(other.as_str()),
        }
    }
}

impl Display for PinRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A physical, numbered contact on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPin {
    /// The pin number. Unique within a board.
    pub number: u32,
    /// The human-readable pin name, e.g. `GPIO2`.
    pub name: ArcStr,
    /// The electrical function of the pin.
    pub role: PinRole,
    /// The pin location relative to the board's top-left corner.
    pub position: Point,
}

impl BoardPin {
    /// Creates a new board pin.
    pub fn new(number: u32, name: impl Into<ArcStr>, role: PinRole, position: Point) -> Self {
        Self {
            number,
            name: name.into(),
            role,
            position,
        }
    }
}

/// A board and its pins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    name: ArcStr,
    width: f64,
    height: f64,
    pins: Vec<BoardPin>,
}

impl Board {
    /// Creates a new board of the given size.
    ///
    /// Fails if two pins share a number or a pin lies outside the board footprint.
    pub fn new(
        name: impl Into<ArcStr>,
        width: f64,
        height: f64,
        pins: impl IntoIterator<Item = BoardPin>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        check_footprint(&name, width, height)?;
        let pins: Vec<BoardPin> = pins.into_iter().collect();

        let mut seen = IndexSet::new();
        for pin in pins.iter() {
            if !seen.insert(pin.number) {
                return Err(CatalogError::DuplicateBoardPin {
                    board: name,
                    number: pin.number,
                });
            }
            if !within(pin.position, width, height) {
                return Err(CatalogError::PinOutsideFootprint {
                    owner: name,
                    pin: pin.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            width,
            height,
            pins,
        })
    }

    /// The name of the board.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The width of the board.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The height of the board.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// All pins, in declaration order.
    #[inline]
    pub fn pins(&self) -> &[BoardPin] {
        &self.pins
    }

    /// Looks up a pin by number.
    pub fn pin(&self, number: u32) -> Option<&BoardPin> {
        self.pins.iter().find(|pin| pin.number == number)
    }

    /// Iterates over the pins carrying `role`, in declaration order.
    pub fn pins_with_role(&self, role: PinRole) -> impl Iterator<Item = &BoardPin> + '_ {
        self.pins.iter().filter(move |pin| pin.role == role)
    }
}

/// A named contact on a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePin {
    /// The pin name. Unique within a device.
    pub name: ArcStr,
    /// The electrical function of the pin.
    pub role: PinRole,
    /// The pin location relative to the device's top-left corner.
    pub position: Point,
}

impl DevicePin {
    /// Creates a new device pin.
    pub fn new(name: impl Into<ArcStr>, role: PinRole, position: Point) -> Self {
        Self {
            name: name.into(),
            role,
            position,
        }
    }
}

/// A peripheral attached to the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    name: ArcStr,
    width: f64,
    height: f64,
    pins: Vec<DevicePin>,
}

impl Device {
    /// Creates a new device of the given size.
    ///
    /// Fails if two pins share a name or a pin lies outside the device footprint.
    pub fn new(
        name: impl Into<ArcStr>,
        width: f64,
        height: f64,
        pins: impl IntoIterator<Item = DevicePin>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        check_footprint(&name, width, height)?;
        let pins: Vec<DevicePin> = pins.into_iter().collect();

        let mut seen = IndexSet::new();
        for pin in pins.iter() {
            if !seen.insert(pin.name.clone()) {
                return Err(CatalogError::DuplicateDevicePin {
                    device: name,
                    pin: pin.name.clone(),
                });
            }
            if !within(pin.position, width, height) {
                return Err(CatalogError::PinOutsideFootprint {
                    owner: name,
                    pin: pin.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            width,
            height,
            pins,
        })
    }

    /// The name of the device. Unique within a diagram.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The width of the device.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The height of the device.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// All pins, in declaration order.
    #[inline]
    pub fn pins(&self) -> &[DevicePin] {
        &self.pins
    }

    /// Looks up a pin by name.
    pub fn pin(&self, name: &str) -> Option<&DevicePin> {
        self.pins.iter().find(|pin| pin.name == name)
    }
}

fn check_footprint(owner: &ArcStr, width: f64, height: f64) -> Result<(), CatalogError> {
    if width.is_finite() && height.is_finite() && width > 0. && height > 0. {
        Ok(())
    } else {
        Err(CatalogError::InvalidFootprint {
            owner: owner.clone(),
            width,
            height,
        })
    }
}

fn within(p: Point, width: f64, height: f64) -> bool {
    p.is_finite() && Rect::from_xywh(0., 0., width, height).contains(p)
}
