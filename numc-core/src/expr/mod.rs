//! Expression trees: the `ArrayOp` capability and the nodes implementing it.
//!
//! Leaves enter a tree as `&Array<T>`, so the borrow checker ties every tree to the arrays it
//! reads. Sub-expressions are moved into their parent node, so a chain such as `&a + &b + &c`
//! never refers to a dropped temporary:
//!
//! ```compile_fail
//! use numc_core::prelude::*;
//!
//! let a = Array::<f64>::new(shape![4]);
//! let sum = {
//!     let b = Array::<f64>::new(shape![4]);
//!     &a + &b
//! };
//! let _ = sum.materialize().exec();
//! ```

/// provide the capability interface of array-like expressions
mod array_op;
pub use array_op::*;

/// provide the coefficient-wise binary expression node
mod cwise_binary_op;
pub use cwise_binary_op::*;

/// provide operator overloads building expression nodes
mod ops;
