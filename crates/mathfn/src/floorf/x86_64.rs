//! x86_64 SSE4.1 `floorf` (`roundss` with round-toward-negative-infinity).
//!
//! Uses `unsafe` for x86 SIMD intrinsics. Callers must ensure SSE4.1 is
//! available before invoking the inner kernel.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::x86_64::{_mm_cvtss_f32, _mm_floor_ss, _mm_set_ss};

#[target_feature(enable = "sse4.1")]
unsafe fn floorf_sse41_impl(x: f32) -> f32 {
  let v = _mm_set_ss(x);
  _mm_cvtss_f32(_mm_floor_ss(v, v))
}

/// Round `x` toward negative infinity with `roundss`.
#[inline]
pub(crate) fn floorf_sse41(x: f32) -> f32 {
  // SAFETY: Dispatcher verifies SSE4.1 before selecting this kernel.
  unsafe { floorf_sse41_impl(x) }
}
