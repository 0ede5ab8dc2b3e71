//! Numerical routines used by the radius refinement.
use ndarray::{Array1, Array2};

mod eigen;
use self::eigen::SymmetricEigen;

/// Relative threshold under which eigenvalues are considered to be zero
const RCOND: f64 = 1e-10;

/// Solve the symmetric linear system `matrix · x = rhs`, using the
/// pseudo-inverse of `matrix`. For singular systems this returns the
/// minimum-norm solution instead of failing.
pub(crate) fn solve_symmetric(matrix: Array2<f64>, rhs: &Array1<f64>) -> Array1<f64> {
    SymmetricEigen::new(matrix).pseudo_solve(rhs, RCOND)
}

/// Get the least-squares solution of the (possibly overdetermined and rank
/// deficient) system `design · x ≈ target`, going through the normal
/// equations `designᵀ · design · x = designᵀ · target`.
pub(crate) fn least_squares(design: &Array2<f64>, target: &Array1<f64>) -> Array1<f64> {
    let normal = design.t().dot(design);
    let rhs = design.t().dot(target);
    solve_symmetric(normal, &rhs)
}

/// Round `value` to the given number of `decimals`
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}
