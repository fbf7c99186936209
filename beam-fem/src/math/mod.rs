//! Dense matrix kernel shared by the assembler, solver and post-processor

pub mod gauss;

use nalgebra::{DMatrix, DVector, SMatrix, SVector};

use crate::error::{BeamError, BeamResult};

pub use gauss::solve_gaussian;

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for beam element stiffness
pub type Mat4 = SMatrix<f64, 4, 4>;
/// 4-element vector for element end displacements/forces
pub type Vec4 = SVector<f64, 4>;

/// Multiply two matrices, checking that the inner dimensions agree
pub fn multiply(a: &Mat, b: &Mat) -> BeamResult<Mat> {
    if a.ncols() != b.nrows() {
        return Err(BeamError::DimensionMismatch {
            op: "multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(a * b)
}

/// Element-wise sum of two equally shaped matrices
pub fn add(a: &Mat, b: &Mat) -> BeamResult<Mat> {
    check_same_shape("add", a, b)?;
    Ok(a + b)
}

/// Element-wise difference `a - b`
pub fn subtract(a: &Mat, b: &Mat) -> BeamResult<Mat> {
    check_same_shape("subtract", a, b)?;
    Ok(a - b)
}

pub fn transpose(a: &Mat) -> Mat {
    a.transpose()
}

pub fn scale(a: &Mat, factor: f64) -> Mat {
    a * factor
}

fn check_same_shape(op: &'static str, a: &Mat, b: &Mat) -> BeamResult<()> {
    if a.shape() != b.shape() {
        return Err(BeamError::DimensionMismatch {
            op,
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

/// Compute the local stiffness matrix for a prismatic Euler-Bernoulli beam element
///
/// DOF order is [v1, θ1, v2, θ2].
pub fn element_stiffness(e: f64, i: f64, l: f64) -> Mat4 {
    let ei = e * i;
    let l2 = l * l;
    let l3 = l2 * l;

    let k1 = 12.0 * ei / l3;
    let k2 = 6.0 * ei / l2;
    let k3 = 4.0 * ei / l;
    let k4 = 2.0 * ei / l;

    #[rustfmt::skip]
    let data = [
         k1,  k2, -k1,  k2,
         k2,  k3, -k2,  k4,
        -k1, -k2,  k1, -k2,
         k2,  k4, -k2,  k3,
    ];

    Mat4::from_row_slice(&data)
}

/// Cubic Hermite shape functions at scaled coordinate `s` on an element of length `l`
pub fn hermite_shape(s: f64, l: f64) -> Vec4 {
    let s2 = s * s;
    let s3 = s2 * s;
    Vec4::new(
        1.0 - 3.0 * s2 + 2.0 * s3,
        l * (s - 2.0 * s2 + s3),
        3.0 * s2 - 2.0 * s3,
        l * (-s2 + s3),
    )
}

/// Second-derivative shape row used for bending moment, scaled by EI/L²
pub fn moment_shape(s: f64, l: f64) -> Vec4 {
    Vec4::new(
        -6.0 + 12.0 * s,
        l * (-4.0 + 6.0 * s),
        6.0 - 12.0 * s,
        l * (-2.0 + 6.0 * s),
    )
}

/// Third-derivative shape row used for shear, scaled by EI/L³
pub fn shear_shape(l: f64) -> Vec4 {
    Vec4::new(-12.0, -6.0 * l, 12.0, -6.0 * l)
}

/// Round `value` to `digits` decimal places
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Compare two values after rounding both to `digits` decimal places
pub fn equal_by_rounding(a: f64, b: f64, digits: u32) -> bool {
    round_to(a, digits) == round_to(b, digits)
}

/// View a vector as an n x 1 matrix
pub fn column(v: &Vec) -> Mat {
    Mat::from_column_slice(v.len(), 1, v.as_slice())
}

/// Format a matrix for trace-level dumps
pub fn format_matrix(name: &str, m: &Mat) -> String {
    let mut out = format!("{} ({}x{}):", name, m.nrows(), m.ncols());
    for row in m.row_iter() {
        out.push('\n');
        let cells: std::vec::Vec<String> = row.iter().map(|v| format!("{:>14.6e}", v)).collect();
        out.push_str(&cells.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_element_stiffness_symmetric() {
        let k = element_stiffness(29e6, 170.0, 60.0);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-9);
            }
        }
        assert_relative_eq!(k[(0, 0)], 12.0 * 29e6 * 170.0 / 60f64.powi(3), epsilon = 1e-6);
        assert_relative_eq!(k[(1, 3)], 2.0 * 29e6 * 170.0 / 60.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rigid_body_translation_gives_no_force() {
        let k = element_stiffness(1.0, 1.0, 3.0);
        let u = Vec4::new(1.0, 0.0, 1.0, 0.0);
        let f = k * u;
        assert_relative_eq!(f.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Mat::zeros(2, 3);
        let b = Mat::zeros(2, 3);
        let err = multiply(&a, &b).unwrap_err();
        assert!(matches!(err, BeamError::DimensionMismatch { op: "multiply", .. }));
        assert_eq!(multiply(&a, &transpose(&b)).unwrap().shape(), (2, 2));
    }

    #[test]
    fn test_add_subtract_scale() {
        let a = Mat::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Mat::identity(2, 2);
        let sum = add(&a, &b).unwrap();
        assert_eq!(sum[(0, 0)], 2.0);
        let diff = subtract(&sum, &b).unwrap();
        assert_eq!(diff, a);
        assert_eq!(scale(&a, 2.0)[(1, 1)], 8.0);
        assert!(add(&a, &Mat::zeros(3, 2)).is_err());
    }

    #[test]
    fn test_hermite_partition_of_unity() {
        for s in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let n = hermite_shape(s, 2.0);
            assert_relative_eq!(n[0] + n[2], 1.0, epsilon = 1e-12);
        }
        let n = hermite_shape(0.0, 2.0);
        assert_relative_eq!(n[0], 1.0);
        let n = hermite_shape(1.0, 2.0);
        assert_relative_eq!(n[2], 1.0);
    }

    #[test]
    fn test_equal_by_rounding() {
        assert!(equal_by_rounding(0.000_200_001, 0.0002, 5));
        assert!(!equal_by_rounding(0.0003, 0.0002, 5));
        assert_eq!(round_to(1.234_567, 3), 1.235);
    }
}
