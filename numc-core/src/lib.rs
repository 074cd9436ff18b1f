//! Core crate of numc.
//!
//! Coefficient-wise arithmetic over arrays is expressed as typed expression trees. Combining two
//! operands with `+`, `-`, `*`, `/` never computes anything: it builds a `CwiseBinaryOp` node whose
//! element type is resolved at compile time through `ScalarBinaryOpTraits`. The tree is evaluated
//! later, as a task executed with an evaluation context.

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]
#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

// core concepts

pub mod shape;

pub mod traits;

pub mod dtype;

pub mod functor;

pub mod expr;

pub mod array;

// evaluation built on core concepts

pub mod eval;

pub mod capability;

// common

pub mod error;

pub mod prelude {
    //! A prelude module re-exporting commonly used items.

    pub use crate::array::*;
    pub use crate::capability::*;
    pub use crate::eval::*;
    pub use crate::expr::*;
    pub use crate::functor::*;
    pub use crate::shape::*;
    pub use crate::traits::*;

    pub use crate::shape;
}
