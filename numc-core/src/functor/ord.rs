use crate::{
    dtype::OpTag,
    functor::BinaryOp,
    traits::{ResultType, ScalarBinaryOpTraits},
};

/// Smaller of two scalars. When the operands are unordered (NaN), the left one is returned.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ScalarMinOp;

/// Larger of two scalars. When the operands are unordered (NaN), the left one is returned.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ScalarMaxOp;

impl<T> BinaryOp<T, T> for ScalarMinOp
where
    T: PartialOrd + ScalarBinaryOpTraits<T, ScalarMinOp, ReturnType = T>,
{
    type Output = ResultType<T, T, ScalarMinOp>;
    const TAG: OpTag = OpTag::Min;

    #[inline]
    fn apply(&self, a: T, b: T) -> T {
        if b < a { b } else { a }
    }
}

impl<T> BinaryOp<T, T> for ScalarMaxOp
where
    T: PartialOrd + ScalarBinaryOpTraits<T, ScalarMaxOp, ReturnType = T>,
{
    type Output = ResultType<T, T, ScalarMaxOp>;
    const TAG: OpTag = OpTag::Max;

    #[inline]
    fn apply(&self, a: T, b: T) -> T {
        if b > a { b } else { a }
    }
}
