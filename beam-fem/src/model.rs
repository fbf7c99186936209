//! Numerical model - topology, element matrices and boundary conditions
//!
//! The assembler turns a [`Scheme`] into the matrices the solver works on:
//! one boolean (incidence) matrix and one 4x4 stiffness matrix per element,
//! the support restraint vector, the global load vector and the restraint
//! projection matrices `Id` and `Ip`.

use log::{debug, log_enabled, trace, Level};
use serde::{Deserialize, Serialize};

use crate::elements::NodeKind;
use crate::error::{BeamError, BeamResult};
use crate::math::{self, Mat, Mat4, Vec as BeamVec};
use crate::scheme::Scheme;

/// Per-element values used by the stiffness matrix and the post-processor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamProperty {
    /// Element number
    pub element: usize,
    /// Young's modulus
    pub e: f64,
    /// Area moment of inertia
    pub i: f64,
    /// Element length
    pub l: f64,
}

impl BeamProperty {
    pub fn ei(&self) -> f64 {
        self.e * self.i
    }
}

/// Matrices of one element
#[derive(Debug, Clone)]
pub struct ElementMatrices {
    /// Element number
    pub number: usize,
    /// (left node, right node)
    pub topology: (usize, usize),
    pub property: BeamProperty,
    /// 4 x 2n incidence matrix from global to element DOFs
    pub boolean: Mat,
    /// Transpose of `boolean`, 2n x 4
    pub boolean_t: Mat,
    /// Local stiffness matrix
    pub stiffness: Mat4,
}

/// Assembled numerical model of a beam
#[derive(Debug, Clone)]
pub struct Model {
    /// Number of nodes
    pub node_count: usize,
    /// Element matrices in element order
    pub elements: Vec<ElementMatrices>,
    /// Restraint flag per DOF, 2n entries of 0 or 1
    pub support: BeamVec,
    /// Applied force/moment per DOF, 2n entries
    pub load: BeamVec,
    /// 2n x 2n identity
    pub identity: Mat,
    /// diag(support)
    pub id: Mat,
    /// identity - id
    pub ip: Mat,
}

impl Model {
    /// Assemble the model from a scheme
    pub fn assemble(scheme: &Scheme) -> BeamResult<Self> {
        let n_dofs = scheme.dof_count();
        let mut elements = Vec::with_capacity(scheme.elements.len());

        for el in &scheme.elements {
            if el.length <= 0.0 {
                return Err(BeamError::InvalidGeometry(format!(
                    "element {} between nodes {} and {} has zero length",
                    el.number, el.left, el.right
                )));
            }
            let material = scheme.material(el.material).ok_or_else(|| {
                BeamError::InvalidInput(format!("material {} not found", el.material))
            })?;
            let section = scheme.section(el.section).ok_or_else(|| {
                BeamError::InvalidInput(format!("cross section {} not found", el.section))
            })?;

            let property = BeamProperty {
                element: el.number,
                e: material.e,
                i: section.i,
                l: el.length,
            };
            let boolean = boolean_matrix(el.left, el.right, n_dofs);
            let boolean_t = boolean.transpose();
            let stiffness = math::element_stiffness(property.e, property.i, property.l);

            elements.push(ElementMatrices {
                number: el.number,
                topology: (el.left, el.right),
                property,
                boolean,
                boolean_t,
                stiffness,
            });
        }

        let mut support = BeamVec::zeros(n_dofs);
        let mut load = BeamVec::zeros(n_dofs);
        for node in &scheme.nodes {
            match node.kind {
                NodeKind::Support(r) => {
                    support[node.displacement_dof()] = f64::from(r.displacement);
                    support[node.rotation_dof()] = f64::from(r.rotation);
                }
                NodeKind::Load { force, moment } => {
                    load[node.displacement_dof()] = force;
                    load[node.rotation_dof()] = moment;
                }
            }
        }

        let identity = Mat::identity(n_dofs, n_dofs);
        let id = Mat::from_diagonal(&support);
        let ip = math::subtract(&identity, &id)?;

        debug!(
            "model assembled: {} elements, {} DOFs, {} restrained",
            elements.len(),
            n_dofs,
            support.iter().filter(|&&v| v == 1.0).count()
        );

        let model = Self {
            node_count: scheme.node_count(),
            elements,
            support,
            load,
            identity,
            id,
            ip,
        };
        model.trace_matrices();
        Ok(model)
    }

    pub fn dof_count(&self) -> usize {
        2 * self.node_count
    }

    /// Element matrices by 1-based element number
    pub fn element(&self, number: usize) -> Option<&ElementMatrices> {
        number.checked_sub(1).and_then(|idx| self.elements.get(idx))
    }

    fn trace_matrices(&self) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        for el in &self.elements {
            trace!("element {} topology {:?}, {:?}", el.number, el.topology, el.property);
            trace!("{}", math::format_matrix("Bool", &el.boolean));
            let k = Mat::from_column_slice(4, 4, el.stiffness.as_slice());
            trace!("{}", math::format_matrix("k", &k));
        }
        trace!("{}", math::format_matrix("Support", &math::column(&self.support)));
        trace!("{}", math::format_matrix("F", &math::column(&self.load)));
        trace!("{}", math::format_matrix("Id", &self.id));
        trace!("{}", math::format_matrix("Ip", &self.ip));
    }
}

/// 4 x n_dofs incidence matrix of the element joining `left` and `right`
pub fn boolean_matrix(left: usize, right: usize, n_dofs: usize) -> Mat {
    let mut b = Mat::zeros(4, n_dofs);
    let l = 2 * (left - 1);
    let r = 2 * (right - 1);
    b[(0, l)] = 1.0;
    b[(1, l + 1)] = 1.0;
    b[(2, r)] = 1.0;
    b[(3, r + 1)] = 1.0;
    b
}
