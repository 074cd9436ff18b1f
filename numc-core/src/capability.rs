//! Platform capability flags and the evaluation strategy derived from them.

use log::trace;

use crate::eval::PacketCtx;

/// Vector instruction sets available to the evaluator.
///
/// The flags are plain data: compute them once (usually with `detect`) and pass them to
/// `EvalStrategy::from_flags`. Nothing in the crate reads target features on its own.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct CapabilityFlags {
    /// x86 SSE2 (128-bit).
    pub sse2: bool,
    /// x86 AVX (256-bit).
    pub avx: bool,
    /// x86 AVX2 (256-bit).
    pub avx2: bool,
    /// x86 AVX-512F (512-bit).
    pub avx512f: bool,
    /// ARM NEON (128-bit).
    pub neon: bool,
}

impl CapabilityFlags {
    /// Flags for the target features enabled at compile time.
    pub const fn detect() -> Self {
        Self {
            sse2: cfg!(target_feature = "sse2"),
            avx: cfg!(target_feature = "avx"),
            avx2: cfg!(target_feature = "avx2"),
            avx512f: cfg!(target_feature = "avx512f"),
            neon: cfg!(target_feature = "neon"),
        }
    }

    /// No vector support; forces the scalar loop.
    pub const fn none() -> Self {
        Self {
            sse2: false,
            avx: false,
            avx2: false,
            avx512f: false,
            neon: false,
        }
    }

    /// Width in bytes of the widest available vector register, or 0 without vector support.
    pub fn vector_bytes(&self) -> usize {
        if self.avx512f {
            64
        } else if self.avx || self.avx2 {
            32
        } else if self.sse2 || self.neon {
            16
        } else {
            0
        }
    }

    /// Number of `T` lanes in one vector register; 1 when `T` does not fit or without vector
    /// support.
    pub fn lanes_for<T>(&self) -> usize {
        let bytes = self.vector_bytes();
        let size = size_of::<T>();
        if size == 0 || size > bytes {
            1
        } else {
            bytes / size
        }
    }
}

/// Evaluation loop selected from the platform capabilities.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EvalStrategy {
    /// One coefficient per iteration.
    Scalar,
    /// Fixed-width blocks of coefficients.
    Packet(PacketCtx),
}

impl EvalStrategy {
    /// Picks the packet loop when a vector register holds more than one `T`.
    pub fn from_flags<T>(flags: CapabilityFlags) -> Self {
        let lanes = flags.lanes_for::<T>();
        let strategy = if lanes > 1 {
            EvalStrategy::Packet(PacketCtx::new(lanes))
        } else {
            EvalStrategy::Scalar
        };
        trace!(
            "selected {:?} for {}-byte elements",
            strategy,
            size_of::<T>()
        );
        strategy
    }
}

impl Default for EvalStrategy {
    fn default() -> Self {
        Self::from_flags::<f64>(CapabilityFlags::detect())
    }
}
