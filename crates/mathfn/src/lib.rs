//! Single-precision floor with one-time CPU-capability dispatch.
//!
//! [`floorf`] rounds toward negative infinity. The first call detects CPU
//! capabilities and binds the entry point to the best kernel the CPU can
//! run; every later call goes straight to that kernel.
//!
//! # Quick Start
//!
//! ```
//! assert_eq!(mathfn::floorf(2.7), 2.0);
//! assert_eq!(mathfn::floorf(-2.3), -3.0);
//! assert_eq!(mathfn::floorf32(-2.3), -3.0);
//! ```
//!
//! # Kernels
//!
//! | Kernel | Tier | Requires |
//! |--------|------|----------|
//! | `x86_64/sse4.1` | hardware | SSE4.1 (x86_64 only) |
//! | `aarch64/frintm` | hardware | NEON (aarch64 only) |
//! | `powerpc/power5plus` | hardware | POWER5+ |
//! | `portable/ppc32` | portable | nothing |
//!
//! Set `MATHFN_FLOORF_FORCE=portable` (or `hardware`) to override automatic
//! selection; see [`floorf::config`].
//!
//! # no_std Support
//!
//! Disable default features for `no_std`. Capability detection then falls
//! back to compile-time target features, and environment configuration is
//! not read.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod floorf;
mod introspect;

pub use backend::{ForceMode, KernelTier};
pub use introspect::{DispatchInfo, Floorf, KernelIntrospect};

/// Round `x` toward negative infinity.
///
/// NaN propagates (quieted); infinities, signed zeros and values with
/// magnitude of at least 2^23 are returned unchanged.
#[inline]
#[must_use]
pub fn floorf(x: f32) -> f32 {
  floorf::DISPATCH.call_with(|f| f(x))
}

/// Compatibility alias for [`floorf`].
///
/// Bound through the same dispatcher, so it always runs the same kernel.
#[inline]
#[must_use]
pub fn floorf32(x: f32) -> f32 {
  floorf::DISPATCH.call_with(|f| f(x))
}
