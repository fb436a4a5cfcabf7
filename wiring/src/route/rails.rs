//! Rail allocation.
//!
//! Rails are vertical lanes in the channel between the board and the device
//! column. Connections are sorted by [`RailKey`], grouped into bundles of
//! connections that share a source pin, and each bundle is given a run of
//! lanes: consecutive bundles are one rail pitch apart, and lanes within a
//! bundle are one bundle pitch apart.

use arcstr::ArcStr;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::connection::{Connection, Source};

/// The group of rails a connection is routed through.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Strip {
    /// Rails for wires leaving the board, nearest the board edge.
    Board,
    /// Rails for device-to-device wires, after the board strip.
    Device,
}

/// The deterministic order in which connections receive rails.
///
/// Board-sourced connections sort before device-sourced ones, so each strip
/// occupies a contiguous run of rails.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub(crate) enum RailKey {
    Board {
        pin: u32,
        device: ArcStr,
        device_pin: ArcStr,
    },
    Device {
        source_device: ArcStr,
        source_pin: ArcStr,
        device: ArcStr,
        device_pin: ArcStr,
    },
}

impl RailKey {
    pub(crate) fn of(connection: &Connection) -> Self {
        match &connection.source {
            Source::Board { pin } => Self::Board {
                pin: *pin,
                device: connection.device.clone(),
                device_pin: connection.device_pin.clone(),
            },
            Source::Device { device, pin } => Self::Device {
                source_device: device.clone(),
                source_pin: pin.clone(),
                device: connection.device.clone(),
                device_pin: connection.device_pin.clone(),
            },
        }
    }
}

impl Strip {
    /// The strip used by connections from `source`.
    pub fn of(source: &Source) -> Self {
        match source {
            Source::Board { .. } => Self::Board,
            Source::Device { .. } => Self::Device,
        }
    }
}

/// Connections that share a source pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    /// The strip the bundle is routed through.
    pub strip: Strip,
    /// The shared source.
    pub source: Source,
    /// Indices of the member connections, in [`RailKey`] order.
    pub members: Vec<usize>,
    /// Offset of the bundle's first lane from the start of the channel.
    pub offset: f64,
}

/// Rail positions for a set of connections, relative to the start of the routing channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RailPlan {
    bundles: Vec<Bundle>,
    count: usize,
    width: f64,
    bundle_pitch: f64,
}

impl RailPlan {
    /// Plans rails for `connections`.
    ///
    /// The plan depends only on the connections and the configuration, not on
    /// where endpoints end up, so the channel width is known before placement.
    pub fn new(connections: &[Connection], config: &LayoutConfig) -> Self {
        let rail_pitch = config.rail_pitch();
        let bundle_pitch = config.bundle_pitch();

        let order: Vec<(RailKey, usize)> = connections
            .iter()
            .enumerate()
            .map(|(idx, connection)| (RailKey::of(connection), idx))
            .sorted()
            .collect();

        let mut bundles = Vec::new();
        let mut cursor = 0.;
        for (source, members) in &order
            .iter()
            .chunk_by(move |(_, idx)| &connections[*idx].source)
        {
            let members: Vec<usize> = members.map(|(_, idx)| *idx).collect();
            let offset = cursor + rail_pitch;
            cursor = offset + (members.len() - 1) as f64 * bundle_pitch;
            bundles.push(Bundle {
                strip: Strip::of(source),
                source: source.clone(),
                members,
                offset,
            });
        }

        let width = if bundles.is_empty() {
            0.
        } else {
            cursor + rail_pitch
        };

        Self {
            bundles,
            count: connections.len(),
            width,
            bundle_pitch,
        }
    }

    /// The bundles, in rail order.
    #[inline]
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// The channel width needed by every rail, including a trailing margin of one rail pitch.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The lane offset of every connection, indexed like the planned connections.
    ///
    /// `reach(idx)` is the vertical distance from connection `idx`'s source to its
    /// destination. Within a bundle, the lane nearest the source column goes to
    /// the member with the longest reach, so that co-sourced wires never cross.
    pub fn lane_offsets(&self, reach: impl Fn(usize) -> f64) -> Vec<f64> {
        let mut offsets = vec![0.; self.count];
        for bundle in self.bundles.iter() {
            let mut members = bundle.members.clone();
            members.sort_by(|a, b| reach(*b).abs().total_cmp(&reach(*a).abs()));
            for (lane, idx) in members.into_iter().enumerate() {
                offsets[idx] = bundle.offset + lane as f64 * self.bundle_pitch;
            }
        }
        offsets
    }
}
