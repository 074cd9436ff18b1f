use crate::{error::EvalError, expr::ArrayOp, functor::BinaryOp, shape::Shape};

/// Expression applying a coefficient-wise binary functor to two expressions.
///
/// This is the return type of the arithmetic operators: `&a + &b` is a
/// `CwiseBinaryOp<ScalarSumOp, &Array<T>, &Array<T>>`. A node is itself an `ArrayOp`, so it can be
/// the operand of further operations, and `&a + &b + &c` nests the first sum as the left operand
/// of the second.
///
/// Construction performs no shape check and no arithmetic. Operand shapes are compared when the
/// tree is evaluated (`ArrayOp::check_shape`).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct CwiseBinaryOp<F, L, R> {
    lhs: L,
    rhs: R,
    functor: F,
}

impl<F, L, R> CwiseBinaryOp<F, L, R>
where
    L: ArrayOp,
    R: ArrayOp,
    F: BinaryOp<L::Scalar, R::Scalar>,
{
    /// Creates a node with the default functor.
    pub fn new(lhs: L, rhs: R) -> Self {
        Self::with_functor(lhs, rhs, F::default())
    }

    /// Creates a node with the given functor.
    pub fn with_functor(lhs: L, rhs: R, functor: F) -> Self {
        Self { lhs, rhs, functor }
    }
}

impl<F, L, R> CwiseBinaryOp<F, L, R> {
    /// Left operand.
    pub fn lhs(&self) -> &L {
        &self.lhs
    }
    /// Right operand.
    pub fn rhs(&self) -> &R {
        &self.rhs
    }
    /// The functor applied to each coefficient pair.
    pub fn functor(&self) -> &F {
        &self.functor
    }
    /// Decomposes the node into its operands and functor.
    pub fn into_raw(self) -> (L, R, F) {
        (self.lhs, self.rhs, self.functor)
    }
}

impl<F, L, R> ArrayOp for CwiseBinaryOp<F, L, R>
where
    L: ArrayOp,
    R: ArrayOp,
    F: BinaryOp<L::Scalar, R::Scalar>,
{
    type Scalar = F::Output;

    fn shape(&self) -> Shape {
        self.lhs.shape()
    }

    #[inline]
    fn coeff(&self, index: usize) -> Self::Scalar {
        self.functor
            .apply(self.lhs.coeff(index), self.rhs.coeff(index))
    }

    fn check_shape(&self) -> Result<Shape, EvalError> {
        let lhs = self.lhs.check_shape()?;
        let rhs = self.rhs.check_shape()?;
        if lhs != rhs {
            return Err(EvalError::ShapeMismatch { lhs, rhs });
        }
        Ok(lhs)
    }
}
