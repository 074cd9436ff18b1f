//! Error types shared by the crate.

use thiserror::Error;

use crate::{
    dtype::{DType, OpTag},
    shape::{MAX_DIMS, Shape},
};

/// Error returned when a shape cannot be built from the given extents.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum ShapeError {
    /// More extents than the fixed capacity of `Shape`.
    #[error("{0} dimensions exceed the maximum of {max}", max = MAX_DIMS)]
    TooManyDims(usize),
    /// The product of the extents does not fit in `usize`.
    #[error("shape size overflows usize")]
    SizeOverflow,
}

/// Error returned by evaluation tasks.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum EvalError {
    /// Two operands of the same node, or an expression and its destination, differ in shape.
    #[error("shape mismatch: {lhs} vs {rhs}")]
    ShapeMismatch {
        /// Shape of the left-hand side (or the destination).
        lhs: Shape,
        /// Shape of the right-hand side (or the expression).
        rhs: Shape,
    },
    /// A coefficient buffer does not hold `shape.size()` elements.
    #[error("buffer of length {len} does not fit shape {shape}")]
    LengthMismatch {
        /// The expected shape.
        shape: Shape,
        /// The actual buffer length.
        len: usize,
    },
}

/// Error returned by the runtime result-type resolver.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum ResolveError {
    /// No rule maps the pair to a result type.
    #[error("no result type for {lhs:?} {op:?} {rhs:?}")]
    Unresolved {
        /// Left operand type.
        lhs: DType,
        /// Right operand type.
        rhs: DType,
        /// Attempted operation.
        op: OpTag,
    },
    /// A registered rule would change the result of an already-resolved pair.
    #[error("rule {lhs:?} {op:?} {rhs:?} -> {requested:?} conflicts with existing result {existing:?}")]
    Conflict {
        /// Left operand type.
        lhs: DType,
        /// Right operand type.
        rhs: DType,
        /// Operation of the rejected rule.
        op: OpTag,
        /// Result already resolved for the pair.
        existing: DType,
        /// Result requested by the rejected rule.
        requested: DType,
    },
}
