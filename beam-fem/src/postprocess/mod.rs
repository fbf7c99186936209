//! Post-processing - element recovery and point evaluation
//!
//! Recovers element end displacements `u_e = Bool_e·U` and end forces
//! `f_e = k_e·u_e`, then evaluates shear, moment and deflection anywhere on
//! the beam from the element shape functions. Shear and moment jump at
//! supports and point loads, so a query that lands exactly on a node returns
//! both one-sided values, taken [`NODE_OFFSET`] to either side.

pub mod plot;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::NODE_OFFSET;
use crate::elements::Node;
use crate::error::BeamResult;
use crate::loads::ConcentratedLoad;
use crate::math::{self, equal_by_rounding, Vec4};
use crate::model::{BeamProperty, Model};
use crate::scheme::Scheme;
use crate::solver::Solution;

pub use plot::{PlotPoint, PlotTable};

/// Shear or moment at a query position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueResult {
    /// The position coincides exactly with a node
    pub is_node: bool,
    /// Value just left of the node, or the value itself
    pub left: f64,
    /// Value just right of the node, or the value itself
    pub right: f64,
    /// |left - right|, zero when not at a node
    pub difference: f64,
}

impl ValueResult {
    fn single(value: f64) -> Self {
        Self {
            is_node: false,
            left: value,
            right: value,
            difference: 0.0,
        }
    }

    fn at_node(left: f64, right: f64) -> Self {
        Self {
            is_node: true,
            left,
            right,
            difference: (left - right).abs(),
        }
    }
}

/// End displacements and forces of one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementResult {
    pub element: usize,
    /// [v1, θ1, v2, θ2]
    pub displacements: [f64; 4],
    /// [V1, M1, V2, M2]
    pub forces: [f64; 4],
}

/// Evaluates results of one solved run
#[derive(Debug)]
pub struct PostProcessor<'a> {
    scheme: &'a Scheme,
    model: &'a Model,
    solution: &'a Solution,
    element_displacements: Vec<Vec4>,
    element_forces: Vec<Vec4>,
    /// Positions of the entered concentrated loads
    concentrated_positions: Vec<f64>,
    round_digits: u32,
}

impl<'a> PostProcessor<'a> {
    /// Recover element results from a solution
    pub fn new(
        scheme: &'a Scheme,
        model: &'a Model,
        solution: &'a Solution,
        entered_loads: &[ConcentratedLoad],
        round_digits: u32,
    ) -> BeamResult<Self> {
        let u = math::column(&solution.displacements);
        let mut element_displacements = Vec::with_capacity(model.elements.len());
        let mut element_forces = Vec::with_capacity(model.elements.len());

        for el in &model.elements {
            let u_e = math::multiply(&el.boolean, &u)?;
            let u_e = Vec4::from_column_slice(u_e.as_slice());
            element_forces.push(el.stiffness * u_e);
            element_displacements.push(u_e);
        }
        debug!("recovered results for {} elements", element_displacements.len());

        Ok(Self {
            scheme,
            model,
            solution,
            element_displacements,
            element_forces,
            concentrated_positions: entered_loads.iter().map(|l| l.position).collect(),
            round_digits,
        })
    }

    pub fn scheme(&self) -> &Scheme {
        self.scheme
    }

    pub fn round_digits(&self) -> u32 {
        self.round_digits
    }

    pub fn beam_length(&self) -> f64 {
        self.scheme.nodes.last().map(|n| n.position).unwrap_or(0.0)
    }

    /// Element end displacements and forces by 1-based element number
    pub fn element_result(&self, number: usize) -> Option<ElementResult> {
        let idx = number.checked_sub(1)?;
        let u = self.element_displacements.get(idx)?;
        let f = self.element_forces.get(idx)?;
        Some(ElementResult {
            element: number,
            displacements: [u[0], u[1], u[2], u[3]],
            forces: [f[0], f[1], f[2], f[3]],
        })
    }

    /// `(displacement, rotation)` of a node
    pub fn nodal_displacement(&self, node: usize) -> Option<(f64, f64)> {
        self.solution.displacement_at(node)
    }

    /// Node sitting exactly at `x`, if any
    pub fn node_at(&self, x: f64) -> Option<&Node> {
        self.scheme.nodes.iter().find(|n| n.position == x)
    }

    /// Shear force at `x`
    pub fn shear_at(&self, x: f64) -> ValueResult {
        self.sided(x, |x| self.shear_value(x))
    }

    /// Bending moment at `x`
    pub fn moment_at(&self, x: f64) -> ValueResult {
        self.sided(x, |x| self.moment_value(x))
    }

    /// Deflection at `x`; exact nodal value when `x` is a node
    pub fn deflection_at(&self, x: f64) -> f64 {
        if let Some(node) = self.node_at(x) {
            return self
                .nodal_displacement(node.number)
                .map(|(v, _)| v)
                .unwrap_or(0.0);
        }
        match self.bracket(x) {
            Some((idx, prop, x_left)) => {
                let s = (x - x_left) / prop.l;
                math::hermite_shape(s, prop.l).dot(&self.element_displacements[idx])
            }
            None => 0.0,
        }
    }

    /// True if `node` carries an entered concentrated load, directly or after
    /// being moved off a support
    pub fn is_concentrated_load(&self, node: &Node) -> bool {
        if node.is_support() {
            return false;
        }
        let offset = crate::analysis::SUPPORT_OFFSET;
        self.concentrated_positions.iter().any(|&p| {
            equal_by_rounding(node.position, p, self.round_digits)
                || equal_by_rounding(node.position - offset, p, self.round_digits)
                || equal_by_rounding(node.position + offset, p, self.round_digits)
        })
    }

    fn sided(&self, x: f64, eval: impl Fn(f64) -> f64) -> ValueResult {
        if self.node_at(x).is_some() {
            ValueResult::at_node(eval(x - NODE_OFFSET), eval(x + NODE_OFFSET))
        } else {
            ValueResult::single(eval(x))
        }
    }

    fn shear_value(&self, x: f64) -> f64 {
        match self.bracket(x) {
            Some((idx, prop, _)) => {
                let factor = prop.ei() / prop.l.powi(3);
                factor * math::shear_shape(prop.l).dot(&self.element_displacements[idx])
            }
            None => 0.0,
        }
    }

    fn moment_value(&self, x: f64) -> f64 {
        match self.bracket(x) {
            Some((idx, prop, x_left)) => {
                let s = (x - x_left) / prop.l;
                let factor = prop.ei() / prop.l.powi(2);
                factor * math::moment_shape(s, prop.l).dot(&self.element_displacements[idx])
            }
            None => 0.0,
        }
    }

    /// Element containing `x`: the first node past `x` and its predecessor.
    /// `None` before the first node or at/after the last one.
    fn bracket(&self, x: f64) -> Option<(usize, BeamProperty, f64)> {
        let end = self.scheme.nodes.iter().position(|n| n.position > x)?;
        if end == 0 {
            return None;
        }
        let start = &self.scheme.nodes[end - 1];
        let el = self.model.elements.get(start.number - 1)?;
        Some((start.number - 1, el.property, start.position))
    }
}
