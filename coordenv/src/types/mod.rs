//! Small fixed-size vector and matrix types used for cell geometry.

/// Implement a binary operator `$Op` for `$Lhs op $Rhs`, both by value and
/// by reference.
macro_rules! impl_arithmetic {
    ($Lhs:ty, $Rhs:ty, $Op:ident, $op:ident, $Output:ty, $sel:ident, $other:ident, $res:expr) => (
        impl std::ops::$Op<$Rhs> for $Lhs {
            type Output = $Output;
            #[inline] fn $op($sel, $other: $Rhs) -> $Output {
                $res
            }
        }

        impl<'a> std::ops::$Op<&'a $Rhs> for &'a $Lhs {
            type Output = $Output;
            #[inline] fn $op(self, other: &'a $Rhs) -> $Output {
                std::ops::$Op::$op(*self, *other)
            }
        }
    );
}

mod vectors;
pub use self::vectors::Vector3D;

mod matrix;
pub use self::matrix::Matrix3;
