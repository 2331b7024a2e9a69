//! Baseline `floorf` for any FPU (ppc32 sequence).
//!
//! Adding and then subtracting 2^23 rounds `x` to an integer in the current
//! (round-to-nearest) mode, because at 2^23 the spacing between floats is
//! exactly 1. A result above `x` is then corrected down by one. This is the
//! same sequence the classic 32-bit PowerPC library uses; it needs nothing
//! beyond IEEE single-precision add and compare, so it is the mandatory
//! default on every target.

/// 2^23: the smallest magnitude at which every `f32` is an integer.
const TWO23: f32 = 8_388_608.0;

const ABS_MASK: u32 = 0x7FFF_FFFF;

/// Round `x` toward negative infinity.
///
/// NaN is returned quieted; infinities, zeros (keeping their sign) and
/// values with `|x| >= 2^23` are returned unchanged.
#[inline]
pub(crate) fn floorf_ppc32(x: f32) -> f32 {
  if x.is_nan() {
    return x + x;
  }
  let ax = f32::from_bits(x.to_bits() & ABS_MASK);
  if !(ax < TWO23) {
    return x;
  }

  if x > 0.0 {
    let r = (x + TWO23) - TWO23;
    if r > x { r - 1.0 } else { r }
  } else if x < 0.0 {
    let r = (x - TWO23) + TWO23;
    if r > x { r - 1.0 } else { r }
  } else {
    x
  }
}
