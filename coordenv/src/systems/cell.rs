//! The `UnitCell` type describes the periodic box of a crystal structure,
//! from its three lengths and three angles.
use crate::{Error, Matrix3, Vector3D};

/// An `UnitCell` defines the lattice of a crystal structure.
///
/// The cell is built from the lengths `a, b, c` (in Å) and the angles
/// `alpha, beta, gamma` (in radians). The `a` vector is along the x axis and
/// the `b` vector in the xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct UnitCell {
    /// Lengths of the cell vectors
    lengths: [f64; 3],
    /// Angles between the cell vectors, in radians
    angles: [f64; 3],
    /// Unit cell matrix, each row is one of the cell vectors
    matrix: Matrix3,
    /// Transpose of the unit cell matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, cached from matrix
    inverse: Matrix3,
    /// Metric tensor `G_ij = v_i · v_j`
    metric: Matrix3,
}

impl UnitCell {
    /// Create a unit cell with side lengths `a, b, c` and angles `alpha,
    /// beta, gamma` given in radians.
    pub fn new(lengths: [f64; 3], angles: [f64; 3]) -> Result<UnitCell, Error> {
        if lengths.iter().any(|&l| !(l.is_finite() && l > 0.0)) {
            return Err(Error::InvalidParameter(format!(
                "cell lengths must be positive, got {:?}", lengths
            )));
        }

        if angles.iter().any(|&a| !(a.is_finite() && a > 0.0 && a < std::f64::consts::PI)) {
            return Err(Error::InvalidParameter(format!(
                "cell angles must be between 0 and π radians, got {:?}", angles
            )));
        }

        let [a, b, c] = lengths;
        let [alpha, beta, gamma] = angles;

        let cos_alpha = alpha.cos();
        let cos_beta = beta.cos();
        let (sin_gamma, cos_gamma) = gamma.sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z2 = c * c - c_y * c_y - c_x * c_x;
        if c_z2 <= 1e-6 * c * c {
            return Err(Error::InvalidParameter(format!(
                "cell angles {:?} do not describe a valid cell", angles
            )));
        }

        let matrix = Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, f64::sqrt(c_z2)],
        ]);

        let metric = Matrix3::new([
            [a * a,             a * b * cos_gamma, a * c * cos_beta],
            [a * b * cos_gamma, b * b,             b * c * cos_alpha],
            [a * c * cos_beta,  b * c * cos_alpha, c * c],
        ]);

        return Ok(UnitCell {
            lengths,
            angles,
            matrix,
            transpose: matrix.transposed(),
            inverse: matrix.transposed().inverse(),
            metric,
        });
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<UnitCell, Error> {
        let right = std::f64::consts::FRAC_PI_2;
        UnitCell::new([a, b, c], [right, right, right])
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<UnitCell, Error> {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Get the lengths `[a, b, c]` of the cell
    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    /// Get the angles `[alpha, beta, gamma]` of the cell, in radians
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the metric tensor of the unit cell
    pub fn metric(&self) -> Matrix3 {
        self.metric
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        // The volume is the mixed product of the three cell vectors
        let a = self.a_vector();
        let b = self.b_vector();
        let c = self.c_vector();
        a * (b ^ c)
    }

    /// Get the distances between faces of the unit cell
    pub fn distances_between_faces(&self) -> Vector3D {
        let (a, b, c) = (self.a_vector(), self.b_vector(), self.c_vector());
        // Plans normal vectors
        let na = (b ^ c).normalized();
        let nb = (c ^ a).normalized();
        let nc = (a ^ b).normalized();

        Vector3D::new(f64::abs(na * a), f64::abs(nb * b), f64::abs(nc * c))
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        return self.transpose * fractional;
    }

    /// Get the fractional representation of the `cartesian` vector in this
    /// cell
    pub fn fractional(&self, cartesian: Vector3D) -> Vector3D {
        return self.inverse * cartesian;
    }

    /// Distance between the two points with fractional coordinates `u` and
    /// `v`, without any periodic boundary conditions: `sqrt(Δᵀ G Δ)`.
    pub fn distance(&self, u: Vector3D, v: Vector3D) -> f64 {
        let delta = v - u;
        let squared = delta * (self.metric * delta);
        // guard against tiny negative values from rounding errors
        f64::sqrt(f64::max(squared, 0.0))
    }

    fn a_vector(&self) -> Vector3D {
        self.matrix[0].into()
    }

    fn b_vector(&self) -> Vector3D {
        self.matrix[1].into()
    }

    fn c_vector(&self) -> Vector3D {
        self.matrix[2].into()
    }
}
