use std::ops::{Index, IndexMut};

use super::Vector3D;

/// A 3x3 matrix, stored in row-major order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3([[f64; 3]; 3]);

impl Matrix3 {
    /// Create a new `Matrix3` from its rows
    pub const fn new(rows: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(rows)
    }

    /// Create a matrix with all entries set to 0
    pub const fn zero() -> Matrix3 {
        Matrix3([[0.0; 3]; 3])
    }

    /// Get the transposed matrix
    pub fn transposed(&self) -> Matrix3 {
        let m = &self.0;
        Matrix3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Compute the determinant of this matrix
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Compute the inverse of this matrix. The matrix must be invertible.
    pub fn inverse(&self) -> Matrix3 {
        let determinant = self.determinant();
        assert!(determinant.abs() > f64::EPSILON, "this matrix is not invertible");

        let m = &self.0;
        let inv_det = 1.0 / determinant;
        Matrix3([
            [
                (m[1][1] * m[2][2] - m[2][1] * m[1][2]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[1][0] * m[0][2] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[2][0] * m[1][1]) * inv_det,
                (m[2][0] * m[0][1] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[1][0] * m[0][1]) * inv_det,
            ],
        ])
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f64; 3];
    #[inline]
    fn index(&self, index: usize) -> &[f64; 3] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix3 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut [f64; 3] {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Matrix3, Vector3D, Mul, mul, Vector3D, self, vector,
    Vector3D::new(
        self[0][0] * vector[0] + self[0][1] * vector[1] + self[0][2] * vector[2],
        self[1][0] * vector[0] + self[1][1] * vector[1] + self[1][2] * vector[2],
        self[2][0] * vector[0] + self[2][1] * vector[1] + self[2][2] * vector[2],
    )
);

impl_arithmetic!(
    Matrix3, Matrix3, Mul, mul, Matrix3, self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = (0..3).map(|k| self[i][k] * other[k][j]).sum();
            }
        }
        result
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;

    #[test]
    fn transposed() {
        let a = Matrix3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let b = Matrix3::new([[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]]);
        assert_eq!(a.transposed(), b);
    }

    #[test]
    fn determinant() {
        let a = Matrix3::new([[2.0, 0.0, 0.0], [1.0, 3.0, 0.0], [4.0, 5.0, 0.5]]);
        assert_eq!(a.determinant(), 3.0);
    }

    #[test]
    fn inverse() {
        let a = Matrix3::new([[2.0, 1.0, 0.0], [0.5, 3.0, 1.0], [1.0, 0.0, 4.0]]);
        let identity = a * a.inverse();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_ulps_eq!(identity[i][j], expected, epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn matrix_vector() {
        let a = Matrix3::new([[1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]);
        let v = Vector3D::new(1.0, -1.0, 2.0);
        assert_eq!(a * v, Vector3D::new(5.0, -1.0, 4.0));
    }
}
