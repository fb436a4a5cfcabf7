use std::path::PathBuf;

use geometry::prelude::*;

use crate::catalog::{Board, BoardPin, Device, DevicePin, PinRole};

mod connection;
mod route;

pub(crate) const TEST_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../tests/data");

pub(crate) fn test_data(file_name: &str) -> PathBuf {
    PathBuf::from(TEST_DATA_DIR).join(file_name)
}

/// A board with pins stacked along its right edge, 10 units apart.
pub(crate) fn board(name: &str, pins: &[(u32, PinRole)]) -> Board {
    let rows = pins.iter().map(|(n, _)| *n).max().unwrap_or(0);
    Board::new(
        name,
        60.,
        10. * rows as f64 + 10.,
        pins.iter().map(|(number, role)| {
            BoardPin::new(
                *number,
                format!("P{number}"),
                *role,
                Point::new(55., 10. * *number as f64),
            )
        }),
    )
    .unwrap()
}

/// The four-pin board used by the end-to-end scenarios.
pub(crate) fn small_board() -> Board {
    board(
        "small",
        &[
            (1, PinRole::Power3v3),
            (3, PinRole::I2cSda),
            (5, PinRole::I2cScl),
            (6, PinRole::Ground),
        ],
    )
}

/// A header exposing every role.
pub(crate) fn header_board() -> Board {
    board(
        "header",
        &[
            (1, PinRole::Power3v3),
            (2, PinRole::Power5v),
            (3, PinRole::I2cSda),
            (4, PinRole::Power5v),
            (5, PinRole::I2cScl),
            (6, PinRole::Ground),
            (7, PinRole::Gpio),
            (8, PinRole::UartTx),
            (9, PinRole::Ground),
            (10, PinRole::UartRx),
            (11, PinRole::Gpio),
            (12, PinRole::Pwm),
            (13, PinRole::Gpio),
            (14, PinRole::Ground),
            (17, PinRole::Power3v3),
            (19, PinRole::SpiMosi),
            (21, PinRole::SpiMiso),
            (23, PinRole::SpiSclk),
            (24, PinRole::SpiCe0),
            (26, PinRole::SpiCe1),
        ],
    )
}

/// A device with pins stacked along its left edge, 10 units apart.
pub(crate) fn device(name: &str, pins: &[(&str, PinRole)]) -> Device {
    Device::new(
        name,
        40.,
        10. * pins.len() as f64 + 10.,
        pins.iter().enumerate().map(|(i, (pin, role))| {
            DevicePin::new(*pin, *role, Point::new(0., 10. * (i + 1) as f64))
        }),
    )
    .unwrap()
}

/// A four-pin I2C peripheral.
pub(crate) fn i2c_sensor(name: &str) -> Device {
    device(
        name,
        &[
            ("VCC", PinRole::Power3v3),
            ("GND", PinRole::Ground),
            ("SDA", PinRole::I2cSda),
            ("SCL", PinRole::I2cScl),
        ],
    )
}
