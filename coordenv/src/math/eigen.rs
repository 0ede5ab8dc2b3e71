// Eigen decomposition of a real symmetric matrix with the cyclic Jacobi
// method, see Golub & Van Loan, "Matrix Computations", section 8.5.

use ndarray::{Array1, Array2};

/// Maximal number of sweeps over the off-diagonal entries
const MAX_SWEEPS: usize = 100;

/// Eigendecomposition of a real symmetric matrix into eigenvalues and
/// eigenvectors
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues of the input matrix, sorted in increasing order
    pub eigenvalues: Array1<f64>,
    /// Eigenvectors of the input matrix, stored as columns
    pub eigenvectors: Array2<f64>,
}

impl SymmetricEigen {
    /// Compute the eigendecomposition of a symmetric real matrix
    #[allow(clippy::float_cmp)]
    pub fn new(matrix: Array2<f64>) -> SymmetricEigen {
        assert_eq!(matrix.nrows(), matrix.ncols());

        let n = matrix.ncols();
        for i in 0..n {
            for j in i..n {
                debug_assert_eq!(matrix[[i, j]], matrix[[j, i]], "matrix is not symmetric");
            }
        }

        let mut a = matrix;
        let mut v = Array2::<f64>::eye(n);

        let scale = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let threshold = f64::EPSILON * f64::max(scale, f64::MIN_POSITIVE);

        for _ in 0..MAX_SWEEPS {
            let off_diagonal = off_diagonal_norm(&a);
            if off_diagonal <= threshold {
                break;
            }

            for p in 0..n {
                for q in (p + 1)..n {
                    if a[[p, q]].abs() <= f64::MIN_POSITIVE {
                        continue;
                    }
                    let (cos, sin) = jacobi_rotation(a[[p, p]], a[[q, q]], a[[p, q]]);
                    rotate(&mut a, &mut v, p, q, cos, sin);
                }
            }
        }

        let mut order = (0..n).collect::<Vec<_>>();
        order.sort_by(|&i, &j| a[[i, i]].total_cmp(&a[[j, j]]));

        let eigenvalues = order.iter().map(|&i| a[[i, i]]).collect::<Array1<f64>>();
        let mut eigenvectors = Array2::zeros((n, n));
        for (new, &old) in order.iter().enumerate() {
            eigenvectors.column_mut(new).assign(&v.column(old));
        }

        SymmetricEigen {
            eigenvalues,
            eigenvectors,
        }
    }

    /// Recreate the input matrix from the eigenvalues and eigenvectors
    #[cfg(test)]
    pub fn recompose(&self) -> Array2<f64> {
        let result = self.eigenvectors.dot(&Array2::from_diag(&self.eigenvalues));
        return result.dot(&self.eigenvectors.t());
    }

    /// Apply the Moore-Penrose pseudo-inverse of the decomposed matrix to
    /// `rhs`. Eigenvalues smaller than `rcond` times the largest eigenvalue
    /// (in absolute value) are treated as zero, which gives the minimum-norm
    /// least-squares solution for singular matrices.
    pub fn pseudo_solve(&self, rhs: &Array1<f64>, rcond: f64) -> Array1<f64> {
        assert_eq!(rhs.len(), self.eigenvalues.len());

        let largest = self.eigenvalues.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        let cutoff = rcond * largest;

        let mut solution = Array1::zeros(rhs.len());
        for (k, &eigenvalue) in self.eigenvalues.iter().enumerate() {
            if eigenvalue.abs() <= cutoff {
                continue;
            }
            let eigenvector = self.eigenvectors.column(k);
            let projection = eigenvector.dot(rhs) / eigenvalue;
            solution.scaled_add(projection, &eigenvector);
        }

        return solution;
    }
}

fn off_diagonal_norm(a: &Array2<f64>) -> f64 {
    let n = a.nrows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                sum += a[[i, j]] * a[[i, j]];
            }
        }
    }
    sum.sqrt()
}

/// Get the cosine and sine of the rotation zeroing the `(p, q)` entry of a
/// symmetric 2x2 block `[[app, apq], [apq, aqq]]`
fn jacobi_rotation(app: f64, aqq: f64, apq: f64) -> (f64, f64) {
    let theta = (aqq - app) / (2.0 * apq);
    let t = theta.signum() / (theta.abs() + f64::sqrt(theta * theta + 1.0));
    let cos = 1.0 / f64::sqrt(t * t + 1.0);
    (cos, t * cos)
}

/// Apply the rotation `J(p, q, θ)` as `Aᵀ J A`, accumulating it in `V`
fn rotate(a: &mut Array2<f64>, v: &mut Array2<f64>, p: usize, q: usize, cos: f64, sin: f64) {
    let n = a.nrows();
    for k in 0..n {
        let akp = a[[k, p]];
        let akq = a[[k, q]];
        a[[k, p]] = cos * akp - sin * akq;
        a[[k, q]] = sin * akp + cos * akq;
    }
    for k in 0..n {
        let apk = a[[p, k]];
        let aqk = a[[q, k]];
        a[[p, k]] = cos * apk - sin * aqk;
        a[[q, k]] = sin * apk + cos * aqk;
    }
    for k in 0..n {
        let vkp = v[[k, p]];
        let vkq = v[[k, q]];
        v[[k, p]] = cos * vkp - sin * vkq;
        v[[k, q]] = sin * vkp + cos * vkq;
    }
}
