use log::debug;
use numc_core::{error::EvalError, eval::EvalCtxImpl, expr::ArrayOp};
use rayon::prelude::*;

/// Context evaluating disjoint chunks of the destination on the rayon thread pool.
///
/// Each worker owns its chunk exclusively, and the expression is only read, so the expression
/// must be `Sync` and its element type `Send`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct ParCtx {
    chunk: usize,
}

impl ParCtx {
    /// Default number of coefficients per task.
    pub const DEFAULT_CHUNK: usize = 4096;

    /// Creates a context splitting the work into chunks of `chunk` coefficients. A chunk size of
    /// zero is treated as one.
    pub fn new(chunk: usize) -> Self {
        Self {
            chunk: chunk.max(1),
        }
    }
    /// Coefficients per task.
    pub fn chunk(&self) -> usize {
        self.chunk
    }
}

impl Default for ParCtx {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHUNK)
    }
}

impl<E> EvalCtxImpl<E> for ParCtx
where
    E: ArrayOp + Sync,
    E::Scalar: Send,
{
    type Err = EvalError;

    fn eval_unchecked(self, expr: &E, dst: &mut [E::Scalar]) -> Result<(), Self::Err> {
        let chunk = self.chunk;
        debug!(
            "parallel loop over {} coefficients in chunks of {chunk}",
            dst.len()
        );
        dst.par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(block, out)| {
                let base = block * chunk;
                for (k, o) in out.iter_mut().enumerate() {
                    *o = expr.coeff(base + k);
                }
            });
        Ok(())
    }
}
