//! numc: n-dimensional arrays with lazily evaluated coefficient-wise expressions.
//!
//! ```
//! use numc::prelude::*;
//!
//! let a = Array::from_vec(shape![2, 2], vec![1.0f64, 2.0, 3.0, 4.0]).unwrap();
//! let b = Array::from_vec(shape![2, 2], vec![4.0f64, 3.0, 2.0, 1.0]).unwrap();
//!
//! // builds a tree, computes nothing
//! let expr = &a + &b + &a;
//!
//! let c = expr.materialize().exec().unwrap();
//! assert_eq!(c.as_slice(), &[6.0, 7.0, 8.0, 9.0]);
//! ```

/// core traits and structs of the expression engine
pub use numc_core as core;

/// ndarray interop and parallel evaluation
pub use numc_ndarray as nd;

pub mod prelude {
    //! A prelude module re-exporting commonly used items.

    pub use numc_core::prelude::*;
    pub use numc_ndarray::{NdArrayExt, NdCtx, ParCtx, from_ndarray};
}
