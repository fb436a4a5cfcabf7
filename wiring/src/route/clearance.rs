//! Clearance checks between routed wires.

use geometry::prelude::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::RoutedWire;

const TOLERANCE: f64 = 1e-6;

/// Two wires whose parallel segments are closer than the required spacing.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearanceViolation {
    /// Index of the first wire.
    pub first: usize,
    /// Index of the second wire.
    pub second: usize,
    /// The measured perpendicular separation.
    pub separation: f64,
    /// The required separation.
    pub required: f64,
}

/// Finds pairs of wires with overlapping parallel segments closer than `spacing`.
///
/// Only axis-aligned segments are compared. Two segments that are each the
/// first or last segment of their wire are exempt: wires that share a pin
/// necessarily meet there.
pub fn check_clearance(wires: &[RoutedWire], spacing: f64) -> Vec<ClearanceViolation> {
    let segments: Vec<Vec<(Segment, bool)>> = wires.iter().map(tagged_segments).collect();

    let mut violations = Vec::new();
    for ((i, a), (j, b)) in segments.iter().enumerate().tuple_combinations() {
        let closest = a
            .iter()
            .cartesian_product(b.iter())
            .filter(|((_, a_terminal), (_, b_terminal))| !(*a_terminal && *b_terminal))
            .filter_map(|((sa, _), (sb, _))| sa.parallel_clearance(sb))
            .map(|clearance| clearance.separation)
            .min_by(f64::total_cmp);

        if let Some(separation) = closest {
            if separation < spacing - TOLERANCE {
                violations.push(ClearanceViolation {
                    first: i,
                    second: j,
                    separation,
                    required: spacing,
                });
            }
        }
    }
    violations
}

fn tagged_segments(wire: &RoutedWire) -> Vec<(Segment, bool)> {
    let segments = wire.segments();
    let last = segments.len().saturating_sub(1);
    segments
        .into_iter()
        .enumerate()
        .map(|(idx, segment)| (segment, idx == 0 || idx == last))
        .collect()
}
