//! Fuzz target for capability-based selection.
//!
//! Tests that:
//! - Any hwcap word pair yields a binding (the table default is reachable)
//! - The POWER5+ bit alone decides between the two PowerPC candidates
//! - Forced selection never binds a kernel the caps cannot run

#![no_main]

use arbitrary::Arbitrary;
use backend::{Candidate, ForceMode, candidates, select_forced};
use libfuzzer_sys::fuzz_target;
use mathfn::floorf::FloorFn;
use platform::{Caps, caps::power, hwcap};

fn hw(x: f32) -> f32 {
  x
}

fn sw(x: f32) -> f32 {
  x
}

const TABLE: &[Candidate<FloorFn>] = candidates![FloorFn;
  "hw" => Hardware, power::POWER5_PLUS => hw,
  "sw" => Portable, Caps::NONE         => sw,
];

#[derive(Arbitrary, Debug)]
struct Input {
  hwcap: u64,
  hwcap2: u64,
  force: u8,
}

fuzz_target!(|input: Input| {
  let caps = hwcap::caps_from_hwcap(input.hwcap, input.hwcap2);
  let selected = mathfn::floorf::select_for_caps(caps);

  let expected = if caps.has(power::POWER5_PLUS) { "powerpc/power5plus" } else { "portable/ppc32" };
  assert_eq!(selected.name, expected, "caps={caps:?}");
  assert_eq!(hwcap::imply_older_isa_levels(caps), caps, "cascade not closed");

  let force = match input.force % 3 {
    0 => ForceMode::Auto,
    1 => ForceMode::Portable,
    _ => ForceMode::Hardware,
  };
  let forced = select_forced(caps, TABLE, force);
  let row = TABLE.iter().find(|c| c.name == forced.name);
  assert!(row.is_some_and(|c| c.is_eligible(caps)), "forced {force} bound {} on {caps:?}", forced.name);
  if force == ForceMode::Portable {
    assert_eq!(forced.name, "sw");
  }
});
