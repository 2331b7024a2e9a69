//! Fuzz target for `Caps` set algebra and the PowerPC hwcap cascade.
//!
//! Tests that:
//! - Union and intersection obey the subset laws `has` relies on
//! - `difference` removes exactly the other operand
//! - The ISA cascade is closed and monotone

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use platform::{Caps, caps::power, hwcap};

#[derive(Arbitrary, Debug)]
struct Input {
  a: [u64; 4],
  b: [u64; 4],
  hwcap: u64,
  hwcap2: u64,
}

fuzz_target!(|input: Input| {
  let a = Caps::from_raw(input.a);
  let b = Caps::from_raw(input.b);

  let union = a | b;
  assert!(union.has(a) && union.has(b), "union must contain both operands");
  let inter = a & b;
  assert!(a.has(inter) && b.has(inter), "operands must contain intersection");
  assert_eq!(a.difference(b) & b, Caps::NONE, "difference must drop the other operand");
  assert_eq!(a.difference(b) | inter, a, "difference plus intersection must rebuild a");
  assert!(a.has(Caps::NONE), "every set contains the empty set");

  let caps = hwcap::caps_from_hwcap(input.hwcap, input.hwcap2);
  assert_eq!(hwcap::imply_older_isa_levels(caps), caps, "cascade must be closed");

  // Adding words never removes a level.
  let more = hwcap::caps_from_hwcap(input.hwcap | u64::from(input.a[0] as u32), input.hwcap2);
  assert!(more.has(caps), "cascade must be monotone");

  if caps.has(power::ARCH_2_05) {
    assert!(caps.has(power::POWER5_PLUS), "ISA 2.05 implies POWER5+");
  }
});
