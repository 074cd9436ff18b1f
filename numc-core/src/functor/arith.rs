use core::ops::{Add, Div, Mul, Sub};

use crate::{
    dtype::OpTag,
    functor::BinaryOp,
    traits::{ResultType, ScalarBinaryOpTraits},
};

macro_rules! impl_arith_functor {
    ($(#[$meta:meta])* $name:ident, $Trait:ident, $method:ident, $tag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
        pub struct $name;

        impl<L, R> BinaryOp<L, R> for $name
        where
            L: ScalarBinaryOpTraits<R, $name> + $Trait<R, Output = ResultType<L, R, $name>>,
        {
            type Output = ResultType<L, R, $name>;
            const TAG: OpTag = OpTag::$tag;

            #[inline]
            fn apply(&self, a: L, b: R) -> Self::Output {
                a.$method(b)
            }
        }
    };
}

impl_arith_functor!(
    /// Sum of two scalars.
    ScalarSumOp, Add, add, Sum
);
impl_arith_functor!(
    /// Difference of two scalars.
    ScalarDifferenceOp, Sub, sub, Difference
);
impl_arith_functor!(
    /// Product of two scalars.
    ScalarProductOp, Mul, mul, Product
);
impl_arith_functor!(
    /// Quotient of two scalars. Division by zero follows the native semantics of the element
    /// type (infinity or NaN for floats, a panic for integers).
    ScalarQuotientOp, Div, div, Quotient
);
