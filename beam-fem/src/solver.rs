//! Direct linear solver
//!
//! Assemble → apply boundary conditions → build augmented system → solve →
//! reactions. Boundary conditions use restraint projection:
//! `K_bc = Ip·K·Ip + Id`, `F_bc = Ip·F`, so restrained DOFs become isolated
//! unit equations with zero right-hand side.

use log::{debug, log_enabled, trace, Level};

use crate::error::{BeamError, BeamResult};
use crate::math::{self, Mat, Vec as BeamVec};
use crate::model::Model;

/// Everything the solver produces for one run
#[derive(Debug, Clone)]
pub struct Solution {
    /// Global stiffness matrix before boundary conditions
    pub k: Mat,
    /// Stiffness matrix with boundary conditions applied
    pub k_bc: Mat,
    /// Load vector with boundary conditions applied
    pub f_bc: BeamVec,
    /// Nodal displacements and rotations, two entries per node
    pub displacements: BeamVec,
    /// `K·U − F`, nonzero only at restrained DOFs
    pub reactions: BeamVec,
}

impl Solution {
    /// `(force, moment)` reaction at a 1-based node number
    pub fn reaction_at(&self, node: usize) -> Option<(f64, f64)> {
        let idx = 2 * node.checked_sub(1)?;
        Some((*self.reactions.get(idx)?, *self.reactions.get(idx + 1)?))
    }

    /// `(displacement, rotation)` at a 1-based node number
    pub fn displacement_at(&self, node: usize) -> Option<(f64, f64)> {
        let idx = 2 * node.checked_sub(1)?;
        Some((*self.displacements.get(idx)?, *self.displacements.get(idx + 1)?))
    }
}

/// Assemble the global stiffness matrix `K = Σ Boolᵀ·k·Bool`
pub fn assemble_global_stiffness(model: &Model) -> BeamResult<Mat> {
    let n = model.dof_count();
    let mut k = Mat::zeros(n, n);
    for el in &model.elements {
        let k_e = Mat::from_column_slice(4, 4, el.stiffness.as_slice());
        let k_el = math::multiply(&math::multiply(&el.boolean_t, &k_e)?, &el.boolean)?;
        k = math::add(&k, &k_el)?;
    }
    Ok(k)
}

/// Apply restraint projection, returning `(K_bc, F_bc)`
pub fn apply_boundary_conditions(model: &Model, k: &Mat) -> BeamResult<(Mat, BeamVec)> {
    let projected = math::multiply(&math::multiply(&model.ip, k)?, &model.ip)?;
    let k_bc = math::add(&projected, &model.id)?;
    let f_bc = math::multiply(&model.ip, &math::column(&model.load))?;
    Ok((k_bc, f_bc.column(0).into_owned()))
}

/// Reject restraint sets that leave a rigid-body mode.
///
/// A continuous beam has two rigid-body modes, vertical translation and
/// rotation. Both are suppressed by two displacement restraints, or by one
/// displacement and one rotation restraint. Round-off keeps the elimination
/// from seeing an exact zero pivot for these mechanisms, so they are caught here.
pub fn check_stability(model: &Model) -> BeamResult<()> {
    let restrained = |offset: usize| {
        model
            .support
            .iter()
            .skip(offset)
            .step_by(2)
            .filter(|&&v| v == 1.0)
            .count()
    };
    let displacement = restrained(0);
    let rotation = restrained(1);

    if displacement >= 2 || (displacement >= 1 && rotation >= 1) {
        return Ok(());
    }
    Err(BeamError::Unstable(format!(
        "{} displacement and {} rotation restraints cannot hold the beam",
        displacement, rotation
    )))
}

/// Run the full solve for an assembled model
pub fn solve(model: &Model) -> BeamResult<Solution> {
    check_stability(model)?;
    let k = assemble_global_stiffness(model)?;
    let (k_bc, f_bc) = apply_boundary_conditions(model, &k)?;

    let displacements = math::solve_gaussian(&k_bc, &f_bc)?;

    let ku = math::multiply(&k, &math::column(&displacements))?;
    let reactions = math::subtract(&ku, &math::column(&model.load))?
        .column(0)
        .into_owned();

    debug!("solved {} DOFs", model.dof_count());

    let solution = Solution {
        k,
        k_bc,
        f_bc,
        displacements,
        reactions,
    };
    if log_enabled!(Level::Trace) {
        trace!("{}", math::format_matrix("K", &solution.k));
        trace!("{}", math::format_matrix("K_bc", &solution.k_bc));
        trace!("{}", math::format_matrix("F_bc", &math::column(&solution.f_bc)));
        trace!("{}", math::format_matrix("U", &math::column(&solution.displacements)));
        trace!("{}", math::format_matrix("R", &math::column(&solution.reactions)));
    }
    Ok(solution)
}
