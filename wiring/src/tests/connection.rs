use test_log::test;

use super::{device, header_board, i2c_sensor};
use crate::assign::assign_pins;
use crate::catalog::PinRole;
use crate::connection::{
    ComponentKind, Connection, ConnectionBuilder, ConnectionSpec, InlineComponent, PathStyle,
    Source,
};
use crate::error::ConnectionError;
use crate::issues::{Cause, Severity};

#[test]
fn spec_with_board_source() {
    let spec: ConnectionSpec = toml::from_str(
        r#"
        board_pin = 7
        device = "led"
        device_pin = "A"
        color = "red"
        style = "curved"

        [[components]]
        kind = "resistor"
        value = "220R"
        position = 0.5
        "#,
    )
    .unwrap();
    let connection = Connection::try_from(spec).unwrap();
    assert_eq!(connection.source, Source::Board { pin: 7 });
    assert_eq!(connection.style, Some(PathStyle::Curved));
    assert_eq!(connection.color.as_deref(), Some("red"));
    assert_eq!(connection.components.len(), 1);
    assert_eq!(connection.components[0].kind, ComponentKind::Resistor);
}

#[test]
fn spec_with_device_source() {
    let spec = ConnectionSpec {
        source_device: Some("sensor".into()),
        source_pin: Some("INT".into()),
        device: "mcu".into(),
        device_pin: "IRQ".into(),
        ..Default::default()
    };
    let connection = Connection::try_from(spec).unwrap();
    assert_eq!(
        connection.source,
        Source::Device {
            device: "sensor".into(),
            pin: "INT".into(),
        }
    );
    assert!(!connection.is_board_sourced());
}

#[test]
fn spec_sources_must_be_exclusive_and_complete() {
    let base = ConnectionSpec {
        device: "led".into(),
        device_pin: "A".into(),
        ..Default::default()
    };

    let ambiguous = ConnectionSpec {
        board_pin: Some(7),
        source_device: Some("sensor".into()),
        source_pin: Some("INT".into()),
        ..base.clone()
    };
    assert!(matches!(
        Connection::try_from(ambiguous),
        Err(ConnectionError::AmbiguousSource { .. })
    ));

    assert!(matches!(
        Connection::try_from(base.clone()),
        Err(ConnectionError::MissingSource { .. })
    ));

    let incomplete = ConnectionSpec {
        source_device: Some("sensor".into()),
        ..base
    };
    assert!(matches!(
        Connection::try_from(incomplete),
        Err(ConnectionError::IncompleteDeviceSource { .. })
    ));
}

#[test]
fn component_positions_must_lie_on_the_wire() {
    let connection = Connection::from_board(7, "led", "A")
        .with_component(InlineComponent::new(ComponentKind::Resistor, 1.5));
    assert!(matches!(
        connection.validate(),
        Err(ConnectionError::ComponentPosition { position, .. }) if position == 1.5
    ));

    let connection = Connection::from_board(7, "led", "A")
        .with_component(InlineComponent::new(ComponentKind::Diode, 0.).with_value("1N4148"))
        .with_component(InlineComponent::new(ComponentKind::Capacitor, 1.));
    assert!(connection.validate().is_ok());
}

#[test]
fn assignments_carry_net_labels() {
    let board = header_board();
    let devices = vec![
        i2c_sensor("bme280"),
        device("led", &[("A", PinRole::Gpio)]),
    ];
    let assignment = assign_pins(&board, &devices).unwrap();

    let mut builder = ConnectionBuilder::new(&board, &devices);
    builder.add_assignments(&assignment.assignments);
    let set = builder.build().unwrap();

    let nets: Vec<Option<&str>> = set
        .connections
        .iter()
        .map(|c| c.net.as_deref())
        .collect();
    assert_eq!(
        nets,
        [Some("3V3"), Some("GND"), Some("I2C_SDA"), Some("I2C_SCL"), None]
    );
    assert!(set.connections.iter().all(Connection::is_board_sourced));
    assert!(set.issues.is_empty());
}

#[test]
fn explicit_connections_override_assignments() {
    let board = header_board();
    let devices = vec![i2c_sensor("bme280"), device("led", &[("A", PinRole::Gpio)])];
    let assignment = assign_pins(&board, &devices).unwrap();

    let mut builder = ConnectionBuilder::new(&board, &devices);
    builder
        .add_assignments(&assignment.assignments)
        .add_connection(Connection::from_board(17, "bme280", "VCC").with_color("orange"))
        .add_connection(Connection::from_device("bme280", "SDA", "led", "A"));
    let set = builder.build().unwrap();

    let order: Vec<(&str, &str)> = set
        .connections
        .iter()
        .map(|c| (c.device.as_str(), c.device_pin.as_str()))
        .collect();
    assert_eq!(
        order,
        [
            ("bme280", "GND"),
            ("bme280", "SDA"),
            ("bme280", "SCL"),
            ("bme280", "VCC"),
            ("led", "A"),
        ]
    );
    assert_eq!(set.connections[3].source, Source::Board { pin: 17 });
    assert_eq!(set.connections[3].color.as_deref(), Some("orange"));

    assert_eq!(set.issues.len(), 2);
    assert_eq!(set.issues.num_warnings(), 0);
    for issue in set.issues.iter() {
        assert!(matches!(issue.cause(), Cause::ConnectionOverridden { .. }));
        assert_eq!(crate::issues::Diagnostic::severity(issue), Severity::Info);
    }
}

#[test]
fn dangling_references_are_rejected() {
    let board = header_board();
    let devices = vec![i2c_sensor("bme280")];

    let mut builder = ConnectionBuilder::new(&board, &devices);
    builder.add_connection(Connection::from_board(99, "bme280", "VCC"));
    assert_eq!(
        builder.build().unwrap_err(),
        ConnectionError::UnknownBoardPin {
            board: "header".into(),
            number: 99,
        }
    );

    let mut builder = ConnectionBuilder::new(&board, &devices);
    builder.add_connection(Connection::from_board(1, "oled", "VCC"));
    assert_eq!(
        builder.build().unwrap_err(),
        ConnectionError::UnknownDevice("oled".into())
    );

    let mut builder = ConnectionBuilder::new(&board, &devices);
    builder.add_connection(Connection::from_device("bme280", "INT", "bme280", "VCC"));
    assert_eq!(
        builder.build().unwrap_err(),
        ConnectionError::UnknownDevicePin {
            device: "bme280".into(),
            pin: "INT".into(),
        }
    );
}
