//! ndarray interop and additional evaluation contexts for numc.
//!
//! - `NdArrayExt::to_ndarray` evaluates any expression straight into an `ndarray::ArrayD`,
//!   `from_ndarray` goes the other way.
//! - `NdCtx` evaluates through an `ndarray` view over the destination buffer.
//! - `ParCtx` evaluates disjoint chunks of the destination in parallel with rayon.

use ndarray::{ArrayD, ArrayViewMutD, Dimension, IxDyn};
use numc_core::{
    array::Array,
    error::{EvalError, ShapeError},
    eval::EvalCtxImpl,
    expr::ArrayOp,
    shape::Shape,
};
use thiserror::Error;

use log::debug;

mod par;
pub use par::*;

/// Errors of the ndarray bridge.
#[derive(Debug, Error)]
pub enum NdError {
    /// ndarray refused a shape or buffer.
    #[error("ndarray error: {0}")]
    Nd(#[from] ndarray::ShapeError),
    /// The ndarray has more axes than a `Shape` can hold.
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
    /// Evaluation failed.
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

fn row_major_offset(strides: &[usize], index: &[usize]) -> usize {
    index.iter().zip(strides).map(|(i, s)| i * s).sum()
}

/// Evaluates expressions into `ndarray` arrays.
pub trait NdArrayExt: ArrayOp {
    /// Validates the tree and evaluates it into a new `ArrayD`.
    fn to_ndarray(&self) -> Result<ArrayD<Self::Scalar>, NdError>;
}

impl<E: ArrayOp> NdArrayExt for E {
    fn to_ndarray(&self) -> Result<ArrayD<Self::Scalar>, NdError> {
        let shape = self.check_shape()?;
        let strides = shape.strides();
        let strides = &strides[..shape.dims()];
        Ok(ArrayD::from_shape_fn(IxDyn(shape.as_slice()), |idx| {
            self.coeff(row_major_offset(strides, idx.slice()))
        }))
    }
}

/// Copies an `ndarray` array (in logical row-major order) into a numc `Array`.
pub fn from_ndarray<T: Clone, D: Dimension>(
    a: &ndarray::ArrayBase<impl ndarray::Data<Elem = T>, D>,
) -> Result<Array<T>, NdError> {
    let shape = Shape::from_raw(a.shape())?;
    Ok(Array::from_vec(shape, a.iter().cloned().collect())?)
}

/// Context evaluating through an `ndarray` view of the destination.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NdCtx;

impl<E: ArrayOp> EvalCtxImpl<E> for NdCtx {
    type Err = NdError;

    fn eval_unchecked(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err> {
        let shape = expr.shape();
        let strides = shape.strides();
        let strides = &strides[..shape.dims()];
        debug!("ndarray indexed loop over {shape}");
        let mut view = ArrayViewMutD::from_shape(IxDyn(shape.as_slice()), dst)?;
        for (idx, out) in view.indexed_iter_mut() {
            *out = expr.coeff(row_major_offset(strides, idx.slice()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{ArrayD, IxDyn};
    use numc_core::prelude::*;
    use rand::Rng;

    use super::*;

    fn random(shape: Shape) -> Array<f64> {
        let mut rng = rand::thread_rng();
        let data = (0..shape.size()).map(|_| rng.r#gen::<f64>()).collect();
        Array::from_vec(shape, data).unwrap()
    }

    #[test]
    fn expression_to_ndarray() -> Result<(), anyhow::Error> {
        let a = random(shape![3, 4, 5]);
        let b = random(shape![3, 4, 5]);

        let nd = (&a + &b).to_ndarray()?;
        let na = (&a).to_ndarray()?;
        let nb = (&b).to_ndarray()?;
        assert_eq!(nd.shape(), &[3, 4, 5]);
        for ai in 0..3 {
            for bi in 0..4 {
                for ci in 0..5 {
                    let e = na[[ai, bi, ci]] + nb[[ai, bi, ci]];
                    assert_eq!(nd[[ai, bi, ci]], e);
                    assert_eq!(*a.get(&[ai, bi, ci]).unwrap(), na[[ai, bi, ci]]);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn ndarray_round_trip_keeps_order() -> Result<(), anyhow::Error> {
        let nd = ArrayD::from_shape_fn(IxDyn(&[2, 3]), |idx| (idx[0] * 10 + idx[1]) as i32);
        let a = from_ndarray(&nd)?;
        assert_eq!(a.shape(), shape![2, 3]);
        assert_eq!(a.as_slice(), &[0, 1, 2, 10, 11, 12]);

        // transposed view is copied in logical order
        let t = from_ndarray(&nd.t())?;
        assert_eq!(t.shape(), shape![3, 2]);
        assert_eq!(t.as_slice(), &[0, 10, 1, 11, 2, 12]);
        Ok(())
    }

    #[test]
    fn too_many_axes_is_rejected() {
        let nd = ArrayD::<f32>::zeros(IxDyn(&[1; 9]));
        assert!(matches!(from_ndarray(&nd), Err(NdError::Shape(_))));
    }

    #[test]
    fn nd_ctx_matches_default_ctx() -> Result<(), anyhow::Error> {
        let a = random(shape![4, 6]);
        let b = random(shape![4, 6]);
        let expr = (&a - &b) * &a;

        let expected = (&expr).materialize().exec()?;
        let actual = (&expr).materialize().with(NdCtx)?;
        assert_eq!(actual, expected);

        let mut c = Array::<f64>::new(shape![4, 6]);
        c.assign(&expr).with(NdCtx)?;
        assert_eq!(c, expected);
        Ok(())
    }

    #[test]
    fn nd_ctx_walks_every_axis() -> Result<(), anyhow::Error> {
        let data = (0..24).map(|i| i as i64).collect();
        let a = Array::from_vec(shape![2, 3, 4], data)?;
        let doubled = (&a + &a).materialize().with(NdCtx)?;
        for (i, &x) in doubled.iter().enumerate() {
            assert_eq!(x, 2 * i as i64);
        }
        assert_eq!(doubled.get(&[1, 2, 3]), Some(&46));

        let s = Array::from_vec(shape![], vec![3.0f32])?;
        let squared = (&s * &s).materialize().with(NdCtx)?;
        assert_eq!(squared.as_slice(), &[9.0]);
        Ok(())
    }

    #[test]
    fn nd_ctx_reports_shape_mismatch() {
        let a = random(shape![2, 3]);
        let b = random(shape![3, 2]);
        let err = (&a + &b).materialize().with(NdCtx).unwrap_err();
        assert!(matches!(err, NdError::Eval(EvalError::ShapeMismatch { .. })));
    }
}
