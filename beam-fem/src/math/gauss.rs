//! Gaussian elimination with row normalization and back substitution
//!
//! There is no partial pivoting: a zero pivot only triggers a swap with a
//! lower row that has a nonzero entry in the pivot column. This is enough for
//! the banded, diagonally dominant systems a continuous beam produces, but it
//! can lose precision on badly conditioned models.

use log::trace;

use super::{Mat, Vec};
use crate::error::{BeamError, BeamResult};

/// Solve `k * u = f` by forward elimination and back substitution
///
/// Returns [`BeamError::SingularMatrix`] when no nonzero pivot can be found
/// for a row, or when the back substitution yields a non-finite value.
pub fn solve_gaussian(k: &Mat, f: &Vec) -> BeamResult<Vec> {
    let n = k.nrows();
    if k.ncols() != n || f.len() != n {
        return Err(BeamError::DimensionMismatch {
            op: "solve_gaussian",
            left: k.shape(),
            right: (f.len(), 1),
        });
    }

    let mut rows = Mat::zeros(n, n + 1);
    rows.view_mut((0, 0), (n, n)).copy_from(k);
    rows.set_column(n, f);

    for i in 0..n {
        if rows[(i, i)] == 0.0 && !sweep(&mut rows, i) {
            return Err(BeamError::SingularMatrix { row: i });
        }

        for j in i..n {
            let lead = rows[(j, i)];
            if lead != 0.0 {
                rows.row_mut(j).unscale_mut(lead);
            }
        }

        for y in (i + 1)..n {
            if rows[(y, i)] != 0.0 {
                let pivot_row = rows.row(i).clone_owned();
                let mut target = rows.row_mut(y);
                target -= pivot_row;
            }
        }
    }

    let mut u = Vec::zeros(n);
    for i in (0..n).rev() {
        let mut val = rows[(i, n)];
        for x in (i + 1)..n {
            val -= rows[(i, x)] * u[x];
        }
        u[i] = val / rows[(i, i)];
        if !u[i].is_finite() {
            return Err(BeamError::SingularMatrix { row: i });
        }
    }

    trace!("gaussian elimination solved {} equations", n);
    Ok(u)
}

/// Swap rows below `i` with a nonzero entry in column `i` up into row `i`.
/// Returns false when every candidate row is zero in that column.
fn sweep(rows: &mut Mat, i: usize) -> bool {
    let n = rows.nrows();
    let mut swapped = false;
    for z in ((i + 1)..n).rev() {
        if rows[(z, i)] != 0.0 {
            rows.swap_rows(z, i);
            swapped = true;
        }
    }
    swapped
}
