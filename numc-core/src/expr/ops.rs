use core::ops::{Add, Div, Mul, Sub};

use crate::{
    array::Array,
    expr::{ArrayOp, CwiseBinaryOp},
    functor::{BinaryOp, ScalarDifferenceOp, ScalarProductOp, ScalarQuotientOp, ScalarSumOp},
};

// `&Array`, `CwiseBinaryOp` and `&CwiseBinaryOp` on the left, any `ArrayOp` on the right

macro_rules! impl_cwise_op {
    ($Trait:ident, $method:ident, $Functor:ty) => {
        impl<'a, T: Copy, Rhs: ArrayOp> $Trait<Rhs> for &'a Array<T>
        where
            $Functor: BinaryOp<T, Rhs::Scalar>,
        {
            type Output = CwiseBinaryOp<$Functor, &'a Array<T>, Rhs>;
            fn $method(self, rhs: Rhs) -> Self::Output {
                CwiseBinaryOp::new(self, rhs)
            }
        }

        impl<F, L: ArrayOp, R: ArrayOp, Rhs: ArrayOp> $Trait<Rhs> for CwiseBinaryOp<F, L, R>
        where
            F: BinaryOp<L::Scalar, R::Scalar>,
            $Functor: BinaryOp<F::Output, Rhs::Scalar>,
        {
            type Output = CwiseBinaryOp<$Functor, Self, Rhs>;
            fn $method(self, rhs: Rhs) -> Self::Output {
                CwiseBinaryOp::new(self, rhs)
            }
        }

        impl<'a, F, L: ArrayOp, R: ArrayOp, Rhs: ArrayOp> $Trait<Rhs>
            for &'a CwiseBinaryOp<F, L, R>
        where
            F: BinaryOp<L::Scalar, R::Scalar>,
            $Functor: BinaryOp<F::Output, Rhs::Scalar>,
        {
            type Output = CwiseBinaryOp<$Functor, Self, Rhs>;
            fn $method(self, rhs: Rhs) -> Self::Output {
                CwiseBinaryOp::new(self, rhs)
            }
        }
    };
}

impl_cwise_op!(Add, add, ScalarSumOp);
impl_cwise_op!(Sub, sub, ScalarDifferenceOp);
impl_cwise_op!(Mul, mul, ScalarProductOp);
impl_cwise_op!(Div, div, ScalarQuotientOp);
