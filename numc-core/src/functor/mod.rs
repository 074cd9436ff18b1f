//! Provide the coefficient-wise functors applied by expression nodes.
//!
//! A functor is a zero-sized value implementing `BinaryOp` for the operand element types it
//! accepts. Its result type always comes from `ScalarBinaryOpTraits`, with the functor itself as
//! the operation tag, so a functor never picks a result type on its own.

use crate::dtype::OpTag;

/// A stateless coefficient-wise binary operation on element types `L` and `R`.
///
/// `apply` must be free of side effects and must not allocate; it is called once per coefficient
/// from every evaluation loop.
pub trait BinaryOp<L, R>: Copy + Default {
    /// The resolved result type.
    type Output;
    /// Runtime tag of the operation.
    const TAG: OpTag;
    /// Applies the operation to one pair of coefficients.
    fn apply(&self, a: L, b: R) -> Self::Output;
}

/// provide arithmetic functors (`+`, `-`, `*`, `/`)
mod arith;
pub use arith::*;

/// provide ordering functors (min, max)
mod ord;
pub use ord::*;
