//! Plot tables for shear, moment and deflection
//!
//! A table is built from equally spaced samples plus the characteristic
//! points of the beam: the ends, every support and every concentrated load.
//! Where shear or moment jumps, the table holds two points [`NODE_OFFSET`]
//! apart so a plot shows a vertical step instead of a slope.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{PostProcessor, ValueResult};
use crate::analysis::{NODE_OFFSET, SUPPORT_OFFSET};
use crate::elements::Node;
use crate::math::{equal_by_rounding, round_to};

/// Digits used to pair up the halves of a load split across a support
const SPLIT_MATCH_DIGITS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub position: f64,
    pub value: f64,
}

/// Position-ordered `(position, value)` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlotTable {
    points: Vec<PlotPoint>,
}

impl PlotTable {
    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlotPoint> {
        self.points.iter()
    }

    /// Point with the largest absolute value; the first one on ties
    pub fn max_abs(&self) -> Option<PlotPoint> {
        self.points.iter().copied().fold(None, |best, p| match best {
            Some(b) if b.value.abs() >= p.value.abs() => Some(b),
            _ => Some(p),
        })
    }

    /// Value stored at `position`, matched at `digits` decimal places
    pub fn value_at(&self, position: f64, digits: u32) -> Option<f64> {
        self.points
            .iter()
            .find(|p| equal_by_rounding(p.position, position, digits))
            .map(|p| p.value)
    }
}

impl From<Vec<PlotPoint>> for PlotTable {
    fn from(mut points: Vec<PlotPoint>) -> Self {
        points.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { points }
    }
}

/// Table under construction, keyed by position quantized to `digits`
struct TableBuilder {
    digits: u32,
    entries: BTreeMap<i64, PlotPoint>,
}

impl TableBuilder {
    fn new(digits: u32) -> Self {
        Self {
            digits,
            entries: BTreeMap::new(),
        }
    }

    fn key(&self, position: f64) -> i64 {
        (position * 10f64.powi(self.digits as i32)).round() as i64
    }

    /// Insert, overwriting any point at the same quantized position
    fn insert(&mut self, position: f64, value: f64) {
        let key = self.key(position);
        self.entries.insert(key, PlotPoint { position, value });
    }

    fn remove(&mut self, position: f64) {
        let key = self.key(position);
        self.entries.remove(&key);
    }

    /// Remove every point within `digits` of `position`, returning the value
    /// of the last one removed
    fn take_near(&mut self, position: f64, digits: u32) -> Option<f64> {
        let target = round_to(position, digits);
        let keys: Vec<i64> = self
            .entries
            .iter()
            .filter(|(_, p)| round_to(p.position, digits) == target)
            .map(|(k, _)| *k)
            .collect();
        keys.into_iter()
            .filter_map(|k| self.entries.remove(&k))
            .last()
            .map(|p| p.value)
    }

    fn build(self) -> PlotTable {
        PlotTable {
            points: self.entries.into_values().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantity {
    Shear,
    Moment,
}

/// Number of sampling intervals for a beam of `length`
pub fn interval_count(length: f64, segment_length: f64) -> usize {
    let n = (length / segment_length).round_ties_even();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

impl PostProcessor<'_> {
    /// Shear force table
    pub fn shear_table(&self, segment_length: f64) -> PlotTable {
        self.force_table(Quantity::Shear, segment_length)
    }

    /// Bending moment table
    pub fn moment_table(&self, segment_length: f64) -> PlotTable {
        self.force_table(Quantity::Moment, segment_length)
    }

    /// Deflection table
    pub fn deflection_table(&self, segment_length: f64) -> PlotTable {
        let digits = self.round_digits();
        let length = self.beam_length();
        let mut table = TableBuilder::new(digits);

        for x in sample_positions(length, segment_length) {
            table.insert(x, self.deflection_at(x));
        }

        let nodes = &self.scheme().nodes;
        for (idx, node) in nodes.iter().enumerate() {
            let pos = node.position;
            let value = self.deflection_at(pos);
            if equal_by_rounding(pos, 0.0, digits) {
                table.insert(0.0, value);
            } else if equal_by_rounding(pos, length, digits) {
                table.insert(length, value);
            } else if node.is_support() {
                table.remove(pos);
                table.insert(pos, value);
            } else if self.is_concentrated_load(node) {
                table.remove(pos);
                // Halves of a load split across a support are drawn by the support point
                if !next_to_support_split(nodes, idx, digits) {
                    table.insert(pos, value);
                }
            }
        }

        let table = table.build();
        debug!("deflection table: {} points", table.len());
        table
    }

    fn value(&self, quantity: Quantity, x: f64) -> ValueResult {
        match quantity {
            Quantity::Shear => self.shear_at(x),
            Quantity::Moment => self.moment_at(x),
        }
    }

    fn force_table(&self, quantity: Quantity, segment_length: f64) -> PlotTable {
        let digits = self.round_digits();
        let length = self.beam_length();
        let mut table = TableBuilder::new(digits);

        for x in sample_positions(length, segment_length) {
            let v = self.value(quantity, x);
            if v.difference == 0.0 {
                table.insert(x, v.left);
            } else if equal_by_rounding(v.left, v.right, digits) {
                table.insert(x, (v.left + v.right) / 2.0);
            } else {
                table.insert(x - NODE_OFFSET, v.left);
                table.insert(x + NODE_OFFSET, v.right);
            }
        }

        let nodes = &self.scheme().nodes;
        let mut split_loads = Vec::new();
        for (idx, node) in nodes.iter().enumerate() {
            let pos = node.position;
            let v = self.value(quantity, pos);
            let holds_rotation = node.restraint().is_some_and(|r| r.rotation_restrained());

            if equal_by_rounding(pos, 0.0, digits) {
                let value = match quantity {
                    Quantity::Shear => v.right,
                    Quantity::Moment if holds_rotation => v.right,
                    Quantity::Moment => v.left,
                };
                table.insert(0.0, value);
            } else if equal_by_rounding(pos, length, digits) {
                let value = match quantity {
                    Quantity::Shear => v.left,
                    Quantity::Moment if holds_rotation => v.left,
                    Quantity::Moment => v.right,
                };
                table.insert(length, value);
            } else if equal_by_rounding(pos, SUPPORT_OFFSET, digits) {
                // Load moved off a support at the left end
                table.insert(pos - NODE_OFFSET, v.right);
            } else if equal_by_rounding(pos, length - SUPPORT_OFFSET, digits) {
                table.insert(pos + NODE_OFFSET, v.left);
            } else if node.is_support() {
                replace_jump(&mut table, pos, v);
            } else if self.is_concentrated_load(node) {
                replace_jump(&mut table, pos, v);
                if let Some(p) = split_support_position(nodes, idx, digits) {
                    split_loads.push(p);
                }
            }
        }

        merge_split_loads(&mut table, &split_loads, digits);

        let table = table.build();
        debug!("{:?} table: {} points", quantity, table.len());
        table
    }
}

/// Sample positions `i/n·L` for `i` in `1..n`
fn sample_positions(length: f64, segment_length: f64) -> impl Iterator<Item = f64> {
    let n = interval_count(length, segment_length);
    (1..n).map(move |i| i as f64 / n as f64 * length)
}

/// Replace whatever sits at and around `pos` with the two one-sided values
fn replace_jump(table: &mut TableBuilder, pos: f64, v: ValueResult) {
    table.remove(pos);
    table.remove(pos - NODE_OFFSET);
    table.remove(pos + NODE_OFFSET);
    table.insert(pos - NODE_OFFSET, v.left);
    table.insert(pos + NODE_OFFSET, v.right);
}

/// Support position when the node at `idx` is one half of a load split
/// across that support
fn split_support_position(nodes: &[Node], idx: usize, digits: u32) -> Option<f64> {
    let pos = nodes[idx].position;
    let next = nodes.get(idx + 1).filter(|n| n.is_support());
    let prev = idx.checked_sub(1).and_then(|i| nodes.get(i)).filter(|n| n.is_support());

    if let Some(next) = next {
        if equal_by_rounding(next.position - pos, SUPPORT_OFFSET, digits) {
            return Some(pos + SUPPORT_OFFSET);
        }
    }
    if let Some(prev) = prev {
        if equal_by_rounding(pos - prev.position, SUPPORT_OFFSET, digits) {
            return Some(pos - SUPPORT_OFFSET);
        }
    }
    None
}

fn next_to_support_split(nodes: &[Node], idx: usize, digits: u32) -> bool {
    split_support_position(nodes, idx, digits).is_some()
}

/// Collapse the two jumps of a load split across a support into one jump at
/// the support, using the values outside the split pair
fn merge_split_loads(table: &mut TableBuilder, split_loads: &[f64], digits: u32) {
    for pair in split_loads.windows(2) {
        if !equal_by_rounding(pair[0], pair[1], digits) {
            continue;
        }
        let p = pair[0];
        let left = p - NODE_OFFSET;
        let right = p + NODE_OFFSET;

        let left_value = table
            .take_near(left - SUPPORT_OFFSET, SPLIT_MATCH_DIGITS)
            .unwrap_or(0.0);
        let right_value = table
            .take_near(right + SUPPORT_OFFSET, SPLIT_MATCH_DIGITS)
            .unwrap_or(0.0);
        table.take_near(left, SPLIT_MATCH_DIGITS);
        table.take_near(right, SPLIT_MATCH_DIGITS);

        table.insert(left, left_value);
        table.insert(right, right_value);
    }
}
