//! Cross-kernel fuzzing for `floorf`.
//!
//! Tests that:
//! - Every available kernel agrees with `f32::floor`
//! - The public entry point and its alias agree bit-for-bit

#![no_main]

use libfuzzer_sys::fuzz_target;
use mathfn::floorf::kernel_test::run_all_floorf_kernels;

fuzz_target!(|bits: u32| {
  let x = f32::from_bits(bits);
  let expected = x.floor();

  for r in run_all_floorf_kernels(x) {
    if expected.is_nan() {
      assert!(r.value.is_nan(), "{} lost NaN for {bits:#010x}", r.name);
    } else {
      assert_eq!(
        r.value.to_bits(),
        expected.to_bits(),
        "{} mismatch for {bits:#010x}: got {}, expected {expected}",
        r.name,
        r.value
      );
    }
  }

  let a = mathfn::floorf(x);
  let b = mathfn::floorf32(x);
  assert!(a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()), "alias mismatch for {bits:#010x}");
});
