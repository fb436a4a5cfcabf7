//! Resolution of device pin roles to board pins.
//!
//! Each device pin asks for a [`PinRole`]. How that request is satisfied
//! depends on the role's [`AssignmentPolicy`]:
//!
//! * **Shared** roles (bus lines) bind every requester to the first board pin
//!   carrying the role, so all devices on a bus end up on the same pin.
//! * **Round-robin** roles (supplies and ground) hand out the board's pins for
//!   the role in order, wrapping around with a [`Cause::PinReused`] warning
//!   once every pin has been used.
//! * **Exclusive** roles bind each board pin at most once.
//! * **Unassigned** pins are skipped; they can only be wired explicitly.
//!
//! Explicit connections given to [`PinAssigner::reserve`] take precedence:
//! the device pins they wire are left alone, and the board pins they drive are
//! never handed out to an exclusive request.
//!
//! Devices are processed in the order given, then pins in declaration order,
//! and the output follows the same order.

use arcstr::ArcStr;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{span, Level};

use crate::catalog::{AssignmentPolicy, Board, BoardPin, Device, DevicePin, PinRole};
use crate::connection::{Connection, Source};
use crate::error::AssignError;
use crate::issues::{Cause, IssueSet, LayoutIssue, Severity};

/// A device pin bound to a board pin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinAssignment {
    /// The device the pin belongs to.
    pub device: ArcStr,
    /// The device pin.
    pub device_pin: ArcStr,
    /// The role that drove the assignment.
    pub role: PinRole,
    /// The assigned board pin number.
    pub board_pin: u32,
}

/// The result of assigning pins for a set of devices.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// The assignments, in device order and then pin declaration order.
    pub assignments: Vec<PinAssignment>,
    /// Advisories raised during assignment.
    pub issues: IssueSet<LayoutIssue>,
}

impl Assignment {
    /// The assignments made for `device`.
    pub fn for_device<'a>(&'a self, device: &'a str) -> impl Iterator<Item = &'a PinAssignment> {
        self.assignments.iter().filter(move |a| a.device == device)
    }
}

/// Assigns board pins to device pins for a single diagram.
///
/// An assigner is consumed by [`PinAssigner::assign`]; its bookkeeping never
/// outlives one call.
#[derive(Debug)]
pub struct PinAssigner<'a> {
    board: &'a Board,
    cursors: IndexMap<PinRole, usize>,
    taken: IndexSet<u32>,
    wired: IndexSet<(ArcStr, ArcStr)>,
}

impl<'a> PinAssigner<'a> {
    /// Creates an assigner drawing pins from `board`.
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            cursors: IndexMap::new(),
            taken: IndexSet::new(),
            wired: IndexSet::new(),
        }
    }

    /// Reserves the pins used by explicit `connections`.
    ///
    /// Destination pins of the connections are skipped by [`PinAssigner::assign`],
    /// and board pins they are sourced from are excluded from exclusive pools.
    pub fn reserve<'c>(mut self, connections: impl IntoIterator<Item = &'c Connection>) -> Self {
        for connection in connections {
            if let Source::Board { pin } = connection.source {
                if self.taken.insert(pin) {
                    tracing::debug!(board_pin = pin, "reserved board pin");
                }
            }
            self.wired
                .insert((connection.device.clone(), connection.device_pin.clone()));
        }
        self
    }

    /// Assigns board pins to every board-assignable pin of `devices`.
    pub fn assign(mut self, devices: &[Device]) -> Result<Assignment, AssignError> {
        let _guard = span!(Level::INFO, "assigning pins", board = %self.board.name()).entered();

        let mut result = Assignment::default();
        for device in devices {
            for pin in device.pins() {
                if self
                    .wired
                    .contains(&(device.name().clone(), pin.name.clone()))
                {
                    continue;
                }
                let board_pin = match pin.role.policy() {
                    AssignmentPolicy::Unassigned => continue,
                    AssignmentPolicy::Shared => self.shared(device, pin)?,
                    AssignmentPolicy::RoundRobin => {
                        self.round_robin(device, pin, &mut result.issues)?
                    }
                    AssignmentPolicy::Exclusive => self.exclusive(device, pin)?,
                };
                tracing::debug!(
                    device = %device.name(),
                    pin = %pin.name,
                    role = %pin.role,
                    board_pin,
                    "assigned pin"
                );
                result.assignments.push(PinAssignment {
                    device: device.name().clone(),
                    device_pin: pin.name.clone(),
                    role: pin.role,
                    board_pin,
                });
            }
        }
        Ok(result)
    }

    fn candidates(&self, role: PinRole) -> Vec<&'a BoardPin> {
        self.board.pins_with_role(role).collect()
    }

    fn shared(&self, device: &Device, pin: &DevicePin) -> Result<u32, AssignError> {
        self.board
            .pins_with_role(pin.role)
            .next()
            .map(|canonical| canonical.number)
            .ok_or_else(|| no_candidate(device, pin))
    }

    fn round_robin(
        &mut self,
        device: &Device,
        pin: &DevicePin,
        issues: &mut IssueSet<LayoutIssue>,
    ) -> Result<u32, AssignError> {
        let candidates = self.candidates(pin.role);
        if candidates.is_empty() {
            return Err(no_candidate(device, pin));
        }

        let cursor = self.cursors.entry(pin.role).or_insert(0);
        let number = candidates[*cursor % candidates.len()].number;
        if *cursor >= candidates.len() {
            issues.add(LayoutIssue::new_and_log(
                Cause::PinReused {
                    role: pin.role,
                    board_pin: number,
                    device: device.name().clone(),
                    device_pin: pin.name.clone(),
                },
                Severity::Warning,
            ));
        }
        *cursor += 1;
        Ok(number)
    }

    fn exclusive(&mut self, device: &Device, pin: &DevicePin) -> Result<u32, AssignError> {
        let candidates = self.candidates(pin.role);
        if candidates.is_empty() {
            return Err(no_candidate(device, pin));
        }

        let free = candidates
            .iter()
            .find(|candidate| !self.taken.contains(&candidate.number))
            .map(|candidate| candidate.number)
            .ok_or_else(|| AssignError::Exhausted {
                device: device.name().clone(),
                pin: pin.name.clone(),
                role: pin.role,
            })?;
        self.taken.insert(free);
        Ok(free)
    }
}

/// Assigns board pins to the pins of `devices`, in order.
///
/// Shorthand for [`PinAssigner::new`] followed by [`PinAssigner::assign`].
pub fn assign_pins(board: &Board, devices: &[Device]) -> Result<Assignment, AssignError> {
    PinAssigner::new(board).assign(devices)
}

fn no_candidate(device: &Device, pin: &DevicePin) -> AssignError {
    AssignError::NoCandidate {
        device: device.name().clone(),
        pin: pin.name.clone(),
        role: pin.role,
    }
}
