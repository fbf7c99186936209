//! Load normalization
//!
//! Turns the entered supports, concentrated loads and distributed loads into
//! the sorted, collision-free node list the scheme is built from. The steps
//! run in a fixed order:
//!
//! 1. distributed loads are simulated by concentrated segment loads and
//!    consolidated with the entered concentrated loads
//! 2. loads sitting on a support are moved off it by [`SUPPORT_OFFSET`]
//! 3. loads at identical positions are summed
//! 4. loads closer than the combine distance are merged at their centroid
//! 5. a merged load whose centroid lands on a support is moved off it again
//!
//! None of these steps fail; a merge that cancels out simply drops the load.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::distributed::SimulatedLoad;
use super::point_load::ConcentratedLoad;
use crate::analysis::{AnalysisOptions, BeamInput, SUPPORT_OFFSET};
use crate::elements::{Node, Restraint, Support};
use crate::math::equal_by_rounding;

/// Which consolidation rules changed the load set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Entered concentrated loads and simulated loads were combined
    pub consolidated: bool,
    /// At least one load was moved off a support
    pub offset_on_support: bool,
    /// At least two loads at the same position were summed
    pub merged_same_position: bool,
    /// At least two loads close together were merged
    pub merged_close_together: bool,
}

/// Output of the normalizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedLoads {
    /// Consolidated loads, sorted by position
    pub loads: Vec<ConcentratedLoad>,
    /// Simulation of every distributed load, in input order
    pub simulated: Vec<SimulatedLoad>,
    pub report: NormalizationReport,
}

/// Run the full consolidation pipeline on the loads of `input`
pub fn normalize_loads(input: &BeamInput, options: &AnalysisOptions) -> NormalizedLoads {
    let simulated: Vec<SimulatedLoad> = input
        .distributed_loads
        .iter()
        .map(|d| d.simulate(input.length, options.output_segment_length))
        .collect();

    let mut report = NormalizationReport::default();
    let (mut loads, consolidated) = consolidate(&input.concentrated_loads, &simulated);
    report.consolidated = consolidated;

    report.offset_on_support = offset_loads_on_supports(
        &mut loads,
        &input.supports,
        input.length,
        options.support_match_digits,
    );
    report.merged_same_position = merge_same_position(&mut loads);
    report.merged_close_together = merge_close_together(
        &mut loads,
        options.combine_load_distance,
        options.round_digits,
    );
    if report.merged_close_together
        && offset_loads_on_supports(
            &mut loads,
            &input.supports,
            input.length,
            options.support_match_digits,
        )
    {
        report.offset_on_support = true;
        report.merged_same_position |= merge_same_position(&mut loads);
    }

    if loads.is_empty() && (!input.concentrated_loads.is_empty() || !simulated.is_empty()) {
        warn!("all loads cancelled out during consolidation");
    }
    debug!("normalized {} loads: {:?}", loads.len(), report);

    NormalizedLoads {
        loads,
        simulated,
        report,
    }
}

/// Combine entered loads with all simulated segment loads and sort by position.
/// The flag is set when both kinds were present.
pub fn consolidate(
    concentrated: &[ConcentratedLoad],
    simulated: &[SimulatedLoad],
) -> (Vec<ConcentratedLoad>, bool) {
    let mut loads: Vec<ConcentratedLoad> = concentrated.to_vec();
    let has_concentrated = !loads.is_empty();
    let mut has_simulated = false;
    for sim in simulated {
        has_simulated |= !sim.loads.is_empty();
        loads.extend(sim.loads.iter().copied());
    }
    sort_by_position(&mut loads);
    let consolidated = loads.len() > 1 && has_concentrated && has_simulated;
    (loads, consolidated)
}

/// Move loads that coincide with a support off it.
///
/// A load on a support at 0 moves right by [`SUPPORT_OFFSET`], one on a
/// support at `beam_length` moves left. A load on an interior support is
/// halved and placed on both sides. Returns true if any load was touched.
pub fn offset_loads_on_supports(
    loads: &mut Vec<ConcentratedLoad>,
    supports: &[Support],
    beam_length: f64,
    digits: u32,
) -> bool {
    let mut found = false;
    let mut out = Vec::with_capacity(loads.len() + supports.len());

    for load in loads.iter() {
        let support = supports
            .iter()
            .find(|s| equal_by_rounding(s.position, load.position, digits));
        match support {
            None => out.push(*load),
            Some(s) => {
                found = true;
                if s.position == 0.0 {
                    out.push(load.at(load.position + SUPPORT_OFFSET));
                } else if s.position == beam_length {
                    out.push(load.at(load.position - SUPPORT_OFFSET));
                } else {
                    let half = load.scaled(0.5);
                    out.push(half.at(load.position - SUPPORT_OFFSET));
                    out.push(half.at(load.position + SUPPORT_OFFSET));
                }
                debug!("load at {} offset from support at {}", load.position, s.position);
            }
        }
    }

    if found {
        sort_by_position(&mut out);
    }
    *loads = out;
    found
}

/// Sum adjacent loads at exactly the same position.
/// A sum with zero force and zero moment is dropped.
pub fn merge_same_position(loads: &mut Vec<ConcentratedLoad>) -> bool {
    let mut found = false;
    let mut i = 0;
    while i + 1 < loads.len() {
        if loads[i].position != loads[i + 1].position {
            i += 1;
            continue;
        }
        found = true;
        let next = loads.remove(i + 1);
        let combined = ConcentratedLoad::new(
            loads[i].position,
            loads[i].force + next.force,
            loads[i].moment + next.moment,
        );
        if combined.is_zero() {
            loads.remove(i);
            i = i.saturating_sub(1);
        } else {
            loads[i] = combined;
        }
    }
    found
}

/// Merge adjacent loads whose spacing is below or equal to `combine_distance`.
///
/// Pairs spaced exactly `2 * SUPPORT_OFFSET` apart are the two halves of a
/// load split over a support and are left alone. The merged load sits at the
/// force-weighted centroid of the pair; moments do not shift it. A pair whose
/// force and moment both cancel is removed. Repeats until nothing changes.
pub fn merge_close_together(
    loads: &mut Vec<ConcentratedLoad>,
    combine_distance: f64,
    digits: u32,
) -> bool {
    let mut found = false;
    loop {
        let mut changed = false;
        let mut i = 0;
        while i + 1 < loads.len() {
            let left = loads[i];
            let right = loads[i + 1];
            let spacing = right.position - left.position;

            let split_pair = equal_by_rounding(spacing, 2.0 * SUPPORT_OFFSET, digits);
            let close = spacing < combine_distance
                || equal_by_rounding(spacing, combine_distance, digits);
            if split_pair || !close {
                i += 1;
                continue;
            }

            found = true;
            changed = true;
            let force = left.force + right.force;
            let moment = left.moment + right.moment;
            loads.remove(i + 1);

            if equal_by_rounding(force, 0.0, digits) && equal_by_rounding(moment, 0.0, digits) {
                loads.remove(i);
                i = i.saturating_sub(1);
                continue;
            }

            let position = if equal_by_rounding(force, 0.0, digits) {
                (left.position + right.position) / 2.0
            } else {
                (left.position * left.force + right.position * right.force) / force
            };
            loads[i] = ConcentratedLoad::new(position, force, moment);
        }
        if !changed {
            break;
        }
    }
    found
}

/// Build the sorted, numbered node list from supports and normalized loads.
///
/// Zero-load nodes are added at 0 and `beam_length` when nothing sits there.
pub fn build_node_list(
    supports: &[Support],
    loads: &[ConcentratedLoad],
    beam_length: f64,
) -> Vec<Node> {
    let mut nodes: Vec<Node> = supports
        .iter()
        .map(|s| Node::support(s.position, s.restraints()))
        .chain(loads.iter().map(|l| Node::load(l.position, l.force, l.moment)))
        .collect();

    if !nodes.iter().any(|n| n.position == 0.0) {
        nodes.push(Node::load(0.0, 0.0, 0.0));
    }
    if !nodes.iter().any(|n| n.position == beam_length) {
        nodes.push(Node::load(beam_length, 0.0, 0.0));
    }

    nodes.sort_by(|a, b| a.position.total_cmp(&b.position));
    for (idx, node) in nodes.iter_mut().enumerate() {
        node.number = idx + 1;
    }
    nodes
}

/// Restraint flags of every support node, in node order
pub fn support_restraints(nodes: &[Node]) -> Vec<(usize, Restraint)> {
    nodes
        .iter()
        .filter_map(|n| n.restraint().map(|r| (n.number, r)))
        .collect()
}

fn sort_by_position(loads: &mut [ConcentratedLoad]) {
    loads.sort_by(|a, b| a.position.total_cmp(&b.position));
}
