//! Evaluation of expression trees.
//!
//! numc uses a "task" and "context" model for evaluation. A task (`Materialize`, `Assign`) holds
//! an expression and its destination; the loop that computes the coefficients is implemented by a
//! context. Running `task.with(ctx)` validates the tree, then hands it to the context; `exec()`
//! runs with the default context `()`.
//!
//! Contexts provided here:
//!
//! - `()`: one linear loop over the coefficients,
//! - `PacketCtx`: the same loop blocked into fixed-width lanes,
//! - `EvalStrategy`: one of the above, chosen from `CapabilityFlags`.

use alloc::{vec, vec::Vec};

use log::debug;
use num_traits::Zero;

use crate::{
    array::Array,
    capability::EvalStrategy,
    error::EvalError,
    expr::ArrayOp,
    traits::NumTraits,
};

/// Trait expressing an evaluation task that runs with a context.
pub trait EvalTask<C> {
    /// The output type of the task.
    type Output;
    /// Executes the task, delegating the coefficient loop to `ctx`.
    fn with(self, ctx: C) -> Self::Output;
}

/// Utility trait for executing a task with the default context `()`.
pub trait DefaultEvalTask: EvalTask<()> {
    /// Executes the task with the default context `()`.
    fn exec(self) -> Self::Output;
}
impl<T: EvalTask<()>> DefaultEvalTask for T {
    fn exec(self) -> Self::Output {
        self.with(())
    }
}

/// Raw context of coefficient evaluation.
pub trait EvalCtxImpl<E: ArrayOp> {
    /// The type of the error returned by the context.
    type Err: From<EvalError>;

    /// Writes every coefficient of `expr` into `dst`, WITHOUT validating shapes.
    ///
    /// The caller must ensure that `expr.check_shape()` succeeded and that `dst` holds exactly
    /// `expr.shape().size()` elements; implementations may panic otherwise.
    fn eval_unchecked(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err>;
}

/// Safe version of `EvalCtxImpl`.
///
/// The blanket implementation validates the tree and the destination length.
pub trait EvalCtx<E: ArrayOp>: EvalCtxImpl<E> {
    /// Safe version of `eval_unchecked`.
    fn eval(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err>;
}
impl<C: EvalCtxImpl<E>, E: ArrayOp> EvalCtx<E> for C {
    fn eval(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err> {
        let shape = expr.check_shape()?;
        if dst.len() != shape.size() {
            return Err(EvalError::LengthMismatch {
                shape,
                len: dst.len(),
            }
            .into());
        }
        self.eval_unchecked(expr, dst)
    }
}

impl<E: ArrayOp> EvalCtxImpl<E> for () {
    type Err = EvalError;

    fn eval_unchecked(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err> {
        debug!("scalar loop over {} coefficients", dst.len());
        for (i, out) in dst.iter_mut().enumerate() {
            *out = expr.coeff(i);
        }
        Ok(())
    }
}

/// Context evaluating coefficients in blocks of `lanes` consecutive elements.
///
/// The inner loop has a fixed trip count, which lets the compiler keep a block in vector
/// registers.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct PacketCtx {
    lanes: usize,
}

impl PacketCtx {
    /// Creates a context with the given lane width. A width of zero is treated as one.
    pub fn new(lanes: usize) -> Self {
        Self {
            lanes: lanes.max(1),
        }
    }
    /// The lane width.
    pub fn lanes(&self) -> usize {
        self.lanes
    }
}

impl<E: ArrayOp> EvalCtxImpl<E> for PacketCtx {
    type Err = EvalError;

    fn eval_unchecked(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err> {
        debug!(
            "packet loop over {} coefficients, {} lanes",
            dst.len(),
            self.lanes
        );
        for (block, chunk) in dst.chunks_mut(self.lanes).enumerate() {
            let base = block * self.lanes;
            for (k, out) in chunk.iter_mut().enumerate() {
                *out = expr.coeff(base + k);
            }
        }
        Ok(())
    }
}

impl<E: ArrayOp> EvalCtxImpl<E> for EvalStrategy {
    type Err = EvalError;

    fn eval_unchecked(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err> {
        match self {
            EvalStrategy::Scalar => ().eval_unchecked(expr, dst),
            EvalStrategy::Packet(ctx) => ctx.eval_unchecked(expr, dst),
        }
    }
}

/// Task evaluating an expression into a newly allocated array.
#[derive(Debug, Clone, Copy)]
pub struct Materialize<E> {
    expr: E,
}

impl<E: ArrayOp> Materialize<E> {
    /// Wraps an expression.
    pub fn new(expr: E) -> Self {
        Self { expr }
    }
    /// Returns the wrapped expression.
    pub fn into_raw(self) -> E {
        self.expr
    }
}

impl<E, C> EvalTask<C> for Materialize<E>
where
    E: ArrayOp,
    E::Scalar: NumTraits,
    C: EvalCtx<E>,
{
    type Output = Result<Array<E::Scalar>, C::Err>;

    fn with(self, ctx: C) -> Self::Output {
        let shape = self.expr.check_shape()?;
        let mut data: Vec<E::Scalar> = vec![E::Scalar::zero(); shape.size()];
        ctx.eval_unchecked(&self.expr, &mut data)?;
        Ok(unsafe { Array::from_vec_unchecked(shape, data) })
    }
}

/// Task evaluating an expression into the storage of an existing array.
///
/// Nothing is written unless the expression and the destination agree in shape.
#[derive(Debug)]
pub struct Assign<'d, T, E> {
    dst: &'d mut Array<T>,
    expr: E,
}

impl<'d, T, E: ArrayOp<Scalar = T>> Assign<'d, T, E> {
    /// Pairs a destination with an expression.
    pub fn new(dst: &'d mut Array<T>, expr: E) -> Self {
        Self { dst, expr }
    }
}

impl<'d, T, E, C> EvalTask<C> for Assign<'d, T, E>
where
    E: ArrayOp<Scalar = T>,
    C: EvalCtx<E>,
{
    type Output = Result<(), C::Err>;

    fn with(self, ctx: C) -> Self::Output {
        let shape = self.expr.check_shape()?;
        if shape != self.dst.shape() {
            return Err(EvalError::ShapeMismatch {
                lhs: self.dst.shape(),
                rhs: shape,
            }
            .into());
        }
        ctx.eval_unchecked(&self.expr, self.dst.as_mut_slice())
    }
}
