//! aarch64 `floorf` (`frintm`).

// SIMD intrinsics require unsafe; safety is documented per-function.
#![allow(unsafe_code)]

use core::arch::aarch64::{vdup_n_f32, vget_lane_f32, vrndm_f32};

#[target_feature(enable = "neon")]
unsafe fn floorf_frintm_impl(x: f32) -> f32 {
  // SAFETY: target_feature ensures NEON is available
  unsafe { vget_lane_f32::<0>(vrndm_f32(vdup_n_f32(x))) }
}

/// Round `x` toward negative infinity with `frintm`.
#[inline]
pub(crate) fn floorf_frintm(x: f32) -> f32 {
  // SAFETY: Dispatcher verifies NEON before selecting this kernel.
  unsafe { floorf_frintm_impl(x) }
}
