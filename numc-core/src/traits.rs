//! Scalar traits and compile-time result-type resolution.
//!
//! `NumTraits` describes the element types an array may hold. `ScalarBinaryOpTraits` maps a pair
//! of element types and an operation tag to the element type of the result. The default rules are:
//!
//! | Lhs | Rhs | Result | Note |
//! |---|---|---|---|
//! | `T` | `T` | `T` | includes `NoScalar` with itself |
//! | `Complex<R>` | `R` | `Complex<R>` | `R: RealScalar` |
//! | `R` | `Complex<R>` | `Complex<R>` | `R: RealScalar` |
//! | `T` | `NoScalar` | `T` | `T: NumTraits` |
//! | `NoScalar` | `T` | `T` | `T: NumTraits` |
//!
//! The impls are mutually exclusive, so the first matching row is the only matching row. Every
//! other pair has no impl and fails to compile:
//!
//! ```compile_fail
//! use numc_core::prelude::*;
//!
//! let a = Array::<f32>::new(shape![2]);
//! let b = Array::<f64>::new(shape![2]);
//! let _ = &a + &b;
//! ```
//!
//! Crates defining their own scalar types add rows by implementing `ScalarBinaryOpTraits` for
//! pairs involving those types; existing rows are never affected.

use core::fmt::Debug;

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::dtype::DType;

/// Element types storable in an array.
pub trait NumTraits: Copy + PartialEq + Debug + Zero + One + Send + Sync + 'static {
    /// The real-component type. Equals `Self` for non-complex types.
    type Real: RealScalar;
    /// Whether the type is complex.
    const IS_COMPLEX: bool;
    /// Runtime tag of the type.
    const DTYPE: DType;
}

/// Non-complex scalar types, which pair with their own `Complex` counterpart.
pub trait RealScalar: NumTraits<Real = Self> + PartialOrd {}

/// Placeholder element type for structural compositions that carry no coefficients.
///
/// It is not a `NumTraits` type: it takes part in result-type resolution only.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct NoScalar;

macro_rules! impl_real {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl NumTraits for $ty {
                type Real = $ty;
                const IS_COMPLEX: bool = false;
                const DTYPE: DType = DType::$dtype;
            }
            impl RealScalar for $ty {}
        )*
    };
}

impl_real!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
);

impl NumTraits for Complex<f32> {
    type Real = f32;
    const IS_COMPLEX: bool = true;
    const DTYPE: DType = DType::C32;
}

impl NumTraits for Complex<f64> {
    type Real = f64;
    const IS_COMPLEX: bool = true;
    const DTYPE: DType = DType::C64;
}

/// Result type of a binary operation `Op` applied to `Self` and `Rhs`.
pub trait ScalarBinaryOpTraits<Rhs, Op> {
    /// The resolved result type.
    type ReturnType;
}

/// Shorthand for the result type of `Op` applied to `A` and `B`.
pub type ResultType<A, B, Op> = <A as ScalarBinaryOpTraits<B, Op>>::ReturnType;

impl<T, Op> ScalarBinaryOpTraits<T, Op> for T {
    type ReturnType = T;
}

impl<R: RealScalar, Op> ScalarBinaryOpTraits<R, Op> for Complex<R> {
    type ReturnType = Complex<R>;
}

impl<R: RealScalar, Op> ScalarBinaryOpTraits<Complex<R>, Op> for R {
    type ReturnType = Complex<R>;
}

impl<T: NumTraits, Op> ScalarBinaryOpTraits<NoScalar, Op> for T {
    type ReturnType = T;
}

impl<T: NumTraits, Op> ScalarBinaryOpTraits<T, Op> for NoScalar {
    type ReturnType = T;
}

#[cfg(test)]
pub(crate) fn same_type<A: 'static, B: 'static>() -> bool {
    core::any::TypeId::of::<A>() == core::any::TypeId::of::<B>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functor::{ScalarProductOp, ScalarSumOp};

    #[test]
    fn identical_types_resolve_to_themselves() {
        assert!(same_type::<ResultType<f32, f32, ScalarSumOp>, f32>());
        assert!(same_type::<ResultType<i64, i64, ScalarSumOp>, i64>());
        assert!(same_type::<ResultType<u8, u8, ScalarProductOp>, u8>());
        assert!(same_type::<
            ResultType<Complex<f64>, Complex<f64>, ScalarSumOp>,
            Complex<f64>,
        >());
    }

    #[test]
    fn complex_with_real_resolves_to_complex() {
        assert!(same_type::<ResultType<Complex<f64>, f64, ScalarSumOp>, Complex<f64>>());
        assert!(same_type::<ResultType<f64, Complex<f64>, ScalarSumOp>, Complex<f64>>());
        assert!(same_type::<ResultType<Complex<f32>, f32, ScalarSumOp>, Complex<f32>>());
        assert!(same_type::<ResultType<f32, Complex<f32>, ScalarSumOp>, Complex<f32>>());
    }

    #[test]
    fn placeholder_resolves_to_other_side() {
        assert!(same_type::<ResultType<f32, NoScalar, ScalarSumOp>, f32>());
        assert!(same_type::<ResultType<NoScalar, i32, ScalarSumOp>, i32>());
        assert!(same_type::<
            ResultType<NoScalar, Complex<f32>, ScalarProductOp>,
            Complex<f32>,
        >());
        assert!(same_type::<ResultType<NoScalar, NoScalar, ScalarSumOp>, NoScalar>());
    }

    #[test]
    fn real_types_report_themselves() {
        assert!(same_type::<<Complex<f32> as NumTraits>::Real, f32>());
        assert!(same_type::<<f64 as NumTraits>::Real, f64>());
        assert!(<Complex<f64> as NumTraits>::IS_COMPLEX);
        assert!(!<i32 as NumTraits>::IS_COMPLEX);
    }
}
