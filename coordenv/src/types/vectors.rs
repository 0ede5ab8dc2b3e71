use std::ops::{Index, IndexMut, Neg};

/// A 3-dimensional vector, used for both Cartesian and fractional
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Vector3D([f64; 3]);

impl Vector3D {
    /// Create a new `Vector3D` with components `x`, `y`, `z`
    pub const fn new(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D([x, y, z])
    }

    /// Create a new `Vector3D` with all components set to 0
    pub const fn zero() -> Vector3D {
        Vector3D([0.0, 0.0, 0.0])
    }

    /// Squared euclidean norm of this vector
    pub fn norm2(&self) -> f64 {
        self * self
    }

    /// Euclidean norm of this vector
    pub fn norm(&self) -> f64 {
        f64::sqrt(self.norm2())
    }

    /// Get a normalized version of this vector
    pub fn normalized(&self) -> Vector3D {
        *self / self.norm()
    }

    /// Get the raw components of this vector
    pub fn as_array(&self) -> &[f64; 3] {
        &self.0
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from(array: [f64; 3]) -> Vector3D {
        Vector3D(array)
    }
}

impl From<Vector3D> for [f64; 3] {
    fn from(vector: Vector3D) -> [f64; 3] {
        vector.0
    }
}

impl Index<usize> for Vector3D {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector3D {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Vector3D, Vector3D, Add, add, Vector3D, self, other,
    Vector3D::new(self[0] + other[0], self[1] + other[1], self[2] + other[2])
);

impl_arithmetic!(
    Vector3D, Vector3D, Sub, sub, Vector3D, self, other,
    Vector3D::new(self[0] - other[0], self[1] - other[1], self[2] - other[2])
);

// dot product
impl_arithmetic!(
    Vector3D, Vector3D, Mul, mul, f64, self, other,
    self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
);

// cross product
impl_arithmetic!(
    Vector3D, Vector3D, BitXor, bitxor, Vector3D, self, other,
    Vector3D::new(
        self[1] * other[2] - self[2] * other[1],
        self[2] * other[0] - self[0] * other[2],
        self[0] * other[1] - self[1] * other[0],
    )
);

impl_arithmetic!(
    Vector3D, f64, Mul, mul, Vector3D, self, other,
    Vector3D::new(self[0] * other, self[1] * other, self[2] * other)
);

impl_arithmetic!(
    Vector3D, f64, Div, div, Vector3D, self, other,
    Vector3D::new(self[0] / other, self[1] / other, self[2] / other)
);

impl Neg for Vector3D {
    type Output = Vector3D;
    #[inline]
    fn neg(self) -> Vector3D {
        Vector3D::new(-self[0], -self[1], -self[2])
    }
}

impl approx::AbsDiffEq for Vector3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        <f64 as approx::AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Vector3D, epsilon: f64) -> bool {
        (0..3).all(|i| <f64 as approx::AbsDiffEq>::abs_diff_eq(&self[i], &other[i], epsilon))
    }
}

impl approx::RelativeEq for Vector3D {
    fn default_max_relative() -> f64 {
        <f64 as approx::RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Vector3D, epsilon: f64, max_relative: f64) -> bool {
        (0..3).all(|i| {
            <f64 as approx::RelativeEq>::relative_eq(&self[i], &other[i], epsilon, max_relative)
        })
    }
}
