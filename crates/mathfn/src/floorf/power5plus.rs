//! POWER5+ `floorf`.
//!
//! POWER5+ added `frim` (floating round to integer minus), which rounds
//! toward negative infinity in one instruction and never touches the FPSCR
//! rounding mode. Stable Rust offers neither PowerPC inline assembly nor a
//! target feature that lets LLVM emit `frim`, so this kernel performs the
//! same operation on the bit pattern: clear the fraction bits below the
//! binary point, then step negative non-integers down by one.
//!
//! The kernel is plain Rust and runs anywhere; the candidate table only
//! prefers it when the capability set reports POWER5+.

const EXP_BIAS: u32 = 127;
const MANTISSA_BITS: u32 = 23;
const MANTISSA_MASK: u32 = 0x007F_FFFF;
const SIGN_MASK: u32 = 0x8000_0000;

/// Round `x` toward negative infinity.
#[inline]
pub(crate) fn floorf_power5plus(x: f32) -> f32 {
  let bits = x.to_bits();
  let biased = (bits >> MANTISSA_BITS) & 0xFF;

  // |x| >= 2^23, infinity or NaN.
  if biased >= EXP_BIAS + MANTISSA_BITS {
    return if x.is_nan() { x + x } else { x };
  }

  let negative = bits & SIGN_MASK != 0;

  // |x| < 1
  if biased < EXP_BIAS {
    if bits & !SIGN_MASK == 0 {
      return x;
    }
    return if negative { -1.0 } else { 0.0 };
  }

  let frac_mask = MANTISSA_MASK >> (biased - EXP_BIAS);
  if bits & frac_mask == 0 {
    return x;
  }

  let truncated = f32::from_bits(bits & !frac_mask);
  if negative { truncated - 1.0 } else { truncated }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rounds_toward_negative_infinity() {
    assert_eq!(floorf_power5plus(2.7), 2.0);
    assert_eq!(floorf_power5plus(-2.3), -3.0);
    assert_eq!(floorf_power5plus(-0.3), -1.0);
    assert_eq!(floorf_power5plus(0.999), 0.0);
    assert_eq!(floorf_power5plus(1.0), 1.0);
    assert_eq!(floorf_power5plus(-1.0), -1.0);
    assert_eq!(floorf_power5plus(-8_388_607.5), -8_388_608.0);
  }

  #[test]
  fn zeros_keep_sign() {
    assert_eq!(floorf_power5plus(0.0).to_bits(), 0.0f32.to_bits());
    assert_eq!(floorf_power5plus(-0.0).to_bits(), (-0.0f32).to_bits());
    assert_eq!(floorf_power5plus(f32::from_bits(1)).to_bits(), 0.0f32.to_bits());
    assert_eq!(floorf_power5plus(-f32::from_bits(1)), -1.0);
  }

  #[test]
  fn specials_pass_through() {
    assert!(floorf_power5plus(f32::NAN).is_nan());
    assert_eq!(floorf_power5plus(f32::INFINITY), f32::INFINITY);
    assert_eq!(floorf_power5plus(f32::NEG_INFINITY), f32::NEG_INFINITY);
    assert_eq!(floorf_power5plus(8_388_608.0), 8_388_608.0);
  }
}
