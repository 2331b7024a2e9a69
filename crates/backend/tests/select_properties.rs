//! Property tests for first-match-wins selection.

use backend::{Candidate, ForceMode, KernelTier, SelectError, select, select_forced, try_select};
use platform::Caps;
use proptest::prelude::*;

type Kernel = fn(f32) -> f32;

fn ident(x: f32) -> f32 {
  x
}

fn arb_caps() -> impl Strategy<Value = Caps> {
  prop::array::uniform4(any::<u64>()).prop_map(Caps::from_raw)
}

/// Sparse requirement sets, so that some candidates match and some do not.
fn arb_requires() -> impl Strategy<Value = Caps> {
  prop::collection::vec(any::<u8>(), 0..3).prop_map(|bits| bits.into_iter().fold(Caps::NONE, |acc, b| acc | Caps::bit(b)))
}

const NAMES: [&str; 6] = ["k0", "k1", "k2", "k3", "k4", "k5"];

fn build_table(requires: &[Caps], with_default: bool) -> Vec<Candidate<Kernel>> {
  let mut table: Vec<Candidate<Kernel>> = requires
    .iter()
    .zip(NAMES)
    .map(|(&req, name)| Candidate::new(name, KernelTier::Hardware, req, ident as Kernel))
    .collect();
  if with_default {
    table.push(Candidate::new("default", KernelTier::Portable, Caps::NONE, ident as Kernel));
  }
  table
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(512))]

  #[test]
  fn selects_first_eligible(caps in arb_caps(), requires in prop::collection::vec(arb_requires(), 0..6)) {
    let table = build_table(&requires, true);
    let selected = select(caps, &table);
    let expected = table.iter().find(|c| caps.has(c.requires)).map(|c| c.name);
    prop_assert_eq!(Some(selected.name), expected);
  }

  #[test]
  fn default_always_terminates(requires in prop::collection::vec(arb_requires(), 0..6)) {
    let table = build_table(&requires, true);
    prop_assert!(try_select(Caps::NONE, &table).is_ok());
  }

  #[test]
  fn selection_is_idempotent(caps in arb_caps(), requires in prop::collection::vec(arb_requires(), 0..6)) {
    let table = build_table(&requires, true);
    let a = select(caps, &table);
    let b = select(caps, &table);
    prop_assert_eq!(a.name, b.name);
    prop_assert_eq!(a.func as usize, b.func as usize);
  }

  #[test]
  fn no_default_and_no_match_is_an_error(requires in prop::collection::vec(arb_requires(), 1..6)) {
    let table = build_table(&requires, false);
    let result = try_select(Caps::NONE, &table);
    if requires.iter().any(|r| r.is_empty()) {
      prop_assert!(result.is_ok());
    } else {
      prop_assert_eq!(result.map(|s| s.name), Err(SelectError::NoMatch));
    }
  }

  #[test]
  fn forced_portable_always_yields_default(caps in arb_caps(), requires in prop::collection::vec(arb_requires(), 0..6)) {
    let table = build_table(&requires, true);
    prop_assert_eq!(select_forced(caps, &table, ForceMode::Portable).name, "default");
  }
}
