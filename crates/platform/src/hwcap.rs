//! Linux PowerPC hwcap translation.
//!
//! The kernel reports PowerPC features through two auxiliary-vector words,
//! `AT_HWCAP` and `AT_HWCAP2`. This module maps those words onto
//! [`power`](crate::caps::power) capability bits.
//!
//! Newer ISA levels are supersets of older ones, but the kernel only sets the
//! bit for the level a CPU identifies as. A POWER7 reports `ARCH_2_06` and not
//! `POWER5_PLUS`, even though it executes `frim`. [`caps_from_hwcap`] applies
//! the implication chain so that selection can test the oldest level a kernel
//! needs:
//!
//! ```text
//! ARCH_3_1 ⇒ ARCH_3_00 ⇒ ARCH_2_07 ⇒ ARCH_2_06 ⇒ ARCH_2_05 ⇒ POWER5_PLUS ⇒ POWER5 ⇒ POWER4
//! ```
//!
//! The translation is pure so it is compiled and tested on every host; only
//! the auxv reader in `detect` is PowerPC-specific.

use crate::caps::{Caps, power};

// `AT_HWCAP` masks (linux/arch/powerpc/include/uapi/asm/cputable.h)
pub const PPC_FEATURE_32: u64 = 0x8000_0000;
pub const PPC_FEATURE_64: u64 = 0x4000_0000;
pub const PPC_FEATURE_HAS_ALTIVEC: u64 = 0x1000_0000;
pub const PPC_FEATURE_HAS_FPU: u64 = 0x0800_0000;
pub const PPC_FEATURE_POWER4: u64 = 0x0008_0000;
pub const PPC_FEATURE_POWER5: u64 = 0x0004_0000;
pub const PPC_FEATURE_POWER5_PLUS: u64 = 0x0002_0000;
pub const PPC_FEATURE_ARCH_2_05: u64 = 0x0000_1000;
pub const PPC_FEATURE_POWER6_EXT: u64 = 0x0000_0200;
pub const PPC_FEATURE_ARCH_2_06: u64 = 0x0000_0100;
pub const PPC_FEATURE_HAS_VSX: u64 = 0x0000_0080;

// `AT_HWCAP2` masks
pub const PPC_FEATURE2_ARCH_2_07: u64 = 0x8000_0000;
pub const PPC_FEATURE2_ARCH_3_00: u64 = 0x0080_0000;
pub const PPC_FEATURE2_ARCH_3_1: u64 = 0x0004_0000;

const HWCAP_MAP: &[(u64, Caps)] = &[
  (PPC_FEATURE_32, power::PPC32),
  (PPC_FEATURE_64, power::PPC64),
  (PPC_FEATURE_HAS_ALTIVEC, power::ALTIVEC),
  (PPC_FEATURE_HAS_FPU, power::FPU),
  (PPC_FEATURE_POWER4, power::POWER4),
  (PPC_FEATURE_POWER5, power::POWER5),
  (PPC_FEATURE_POWER5_PLUS, power::POWER5_PLUS),
  (PPC_FEATURE_ARCH_2_05, power::ARCH_2_05),
  (PPC_FEATURE_POWER6_EXT, power::POWER6_EXT),
  (PPC_FEATURE_ARCH_2_06, power::ARCH_2_06),
  (PPC_FEATURE_HAS_VSX, power::VSX),
];

const HWCAP2_MAP: &[(u64, Caps)] = &[
  (PPC_FEATURE2_ARCH_2_07, power::ARCH_2_07),
  (PPC_FEATURE2_ARCH_3_00, power::ARCH_3_00),
  (PPC_FEATURE2_ARCH_3_1, power::ARCH_3_1),
];

/// Newest first; each level implies the one after it.
const ISA_CHAIN: [Caps; 8] = [
  power::ARCH_3_1,
  power::ARCH_3_00,
  power::ARCH_2_07,
  power::ARCH_2_06,
  power::ARCH_2_05,
  power::POWER5_PLUS,
  power::POWER5,
  power::POWER4,
];

/// Translate raw `AT_HWCAP`/`AT_HWCAP2` words into capability bits.
///
/// Unknown bits are ignored. The ISA implication chain is applied, so the
/// result always contains every older level implied by the newest reported.
#[must_use]
pub fn caps_from_hwcap(hwcap: u64, hwcap2: u64) -> Caps {
  let mut caps = Caps::NONE;

  for &(mask, bit) in HWCAP_MAP {
    if hwcap & mask != 0 {
      caps |= bit;
    }
  }
  for &(mask, bit) in HWCAP2_MAP {
    if hwcap2 & mask != 0 {
      caps |= bit;
    }
  }

  imply_older_isa_levels(caps)
}

/// Close `caps` under the ISA implication chain.
#[must_use]
pub fn imply_older_isa_levels(caps: Caps) -> Caps {
  let newest = ISA_CHAIN.iter().position(|&level| caps.has(level));
  match newest.and_then(|idx| ISA_CHAIN.get(idx..)) {
    Some(implied) => implied.iter().fold(caps, |acc, &level| acc | level),
    None => caps,
  }
}
