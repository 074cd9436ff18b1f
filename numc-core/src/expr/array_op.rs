use crate::{
    error::EvalError,
    eval::Materialize,
    expr::CwiseBinaryOp,
    functor::{BinaryOp, ScalarMaxOp, ScalarMinOp},
    shape::Shape,
};

/// Capability every array-like expression implements.
///
/// An implementor is a leaf (`&Array<T>`) or a node built from other implementors. Composition is
/// static: the concrete type of a tree spells out its whole structure, and `Scalar` is resolved at
/// compile time from the operand element types.
///
/// Combining expressions never evaluates them. Operator syntax (`+`, `-`, `*`, `/`) and the
/// combinators below only build new nodes; evaluation happens through `materialize` or
/// `Array::assign`.
///
/// The operators are implemented for `&Array<T>` and for `CwiseBinaryOp` (owned or borrowed)
/// only. Code generic over `E: ArrayOp`, or holding some other implementor such as `&&Array<T>`,
/// spells them with `binary_expr` and the matching functor:
///
/// ```
/// use numc_core::prelude::*;
///
/// fn sum<A: ArrayOp, B: ArrayOp>(a: A, b: B) -> CwiseBinaryOp<ScalarSumOp, A, B>
/// where
///     ScalarSumOp: BinaryOp<A::Scalar, B::Scalar>,
/// {
///     a.binary_expr(b, ScalarSumOp)
/// }
///
/// let x = Array::from_vec(shape![2], vec![1.0f64, 2.0]).unwrap();
/// let y = sum(&&x, &x).materialize().exec().unwrap();
/// assert_eq!(y.as_slice(), &[2.0, 4.0]);
/// ```
pub trait ArrayOp {
    /// Element type of the expression.
    type Scalar;

    /// Shape of the expression. For a node this is the shape of its left operand; see
    /// `check_shape` for the validated shape of the whole tree.
    fn shape(&self) -> Shape;

    /// Coefficient at the row-major linear `index`.
    ///
    /// The caller must keep `index < self.shape().size()`; leaves panic otherwise.
    fn coeff(&self, index: usize) -> Self::Scalar;

    /// Validates that all operands in the tree agree in shape, and returns that shape.
    fn check_shape(&self) -> Result<Shape, EvalError> {
        Ok(self.shape())
    }

    /// Combines `self` and `rhs` with an arbitrary functor.
    fn binary_expr<R, F>(self, rhs: R, functor: F) -> CwiseBinaryOp<F, Self, R>
    where
        Self: Sized,
        R: ArrayOp,
        F: BinaryOp<Self::Scalar, R::Scalar>,
    {
        CwiseBinaryOp::with_functor(self, rhs, functor)
    }

    /// Coefficient-wise minimum of `self` and `rhs`.
    fn cwise_min<R>(self, rhs: R) -> CwiseBinaryOp<ScalarMinOp, Self, R>
    where
        Self: Sized,
        R: ArrayOp,
        ScalarMinOp: BinaryOp<Self::Scalar, R::Scalar>,
    {
        CwiseBinaryOp::new(self, rhs)
    }

    /// Coefficient-wise maximum of `self` and `rhs`.
    fn cwise_max<R>(self, rhs: R) -> CwiseBinaryOp<ScalarMaxOp, Self, R>
    where
        Self: Sized,
        R: ArrayOp,
        ScalarMaxOp: BinaryOp<Self::Scalar, R::Scalar>,
    {
        CwiseBinaryOp::new(self, rhs)
    }

    /// Returns a task that evaluates the expression into a new array.
    fn materialize(self) -> Materialize<Self>
    where
        Self: Sized,
    {
        Materialize::new(self)
    }
}

/// Element type of an expression.
pub type ElementType<E> = <E as ArrayOp>::Scalar;

impl<E: ArrayOp + ?Sized> ArrayOp for &E {
    type Scalar = E::Scalar;

    fn shape(&self) -> Shape {
        (**self).shape()
    }
    fn coeff(&self, index: usize) -> Self::Scalar {
        (**self).coeff(index)
    }
    fn check_shape(&self) -> Result<Shape, EvalError> {
        (**self).check_shape()
    }
}
