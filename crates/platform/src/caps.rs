//! CPU capability representation.
//!
//! [`Caps`] answers one question for the dispatcher: "may this kernel run
//! here?". It is a 256-bit bitset; each bit names one hardware feature.
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86/x86_64 features
//! - Bits 64-127: aarch64 features
//! - Bits 128-191: PowerPC features (32- and 64-bit, Linux hwcap vocabulary)
//! - Bits 192-255: reserved
//!
//! # Usage
//!
//! ```
//! use platform::caps::{Caps, power};
//!
//! let caps = power::POWER5 | power::POWER5_PLUS;
//! assert!(caps.has(power::POWER5_PLUS));
//! assert!(!Caps::NONE.has(power::POWER5_PLUS));
//! ```

// alloc is only needed for tests (feature_names iteration with Vec)
#[cfg(test)]
extern crate alloc;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 256-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`; once detected it is never mutated.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 4]);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self([0; 4]);

  /// Create a capability set from raw words.
  ///
  /// Only available with the `testing` feature or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 4]) -> Self {
    Self(words)
  }

  /// Access the raw underlying words.
  ///
  /// Only available with the `testing` feature or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn as_raw(&self) -> &[u64; 4] {
    &self.0
  }

  /// Check if all features in `required` are present.
  ///
  /// `Caps::NONE` is contained in every set, which is what makes an
  /// unconditional fallback candidate always eligible.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0]
      && (self.0[1] & required.0[1]) == required.0[1]
      && (self.0[2] & required.0[2]) == required.0[2]
      && (self.0[3] & required.0[3]) == required.0[3]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([
      self.0[0] | other.0[0],
      self.0[1] | other.0[1],
      self.0[2] | other.0[2],
      self.0[3] | other.0[3],
    ])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self([
      self.0[0] & other.0[0],
      self.0[1] & other.0[1],
      self.0[2] & other.0[2],
      self.0[3] & other.0[3],
    ])
  }

  /// Remove every feature in `other` from `self`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self([
      self.0[0] & !other.0[0],
      self.0[1] & !other.0[1],
      self.0[2] & !other.0[2],
      self.0[3] & !other.0[3],
    ])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones() + self.0[2].count_ones() + self.0[3].count_ones()
  }

  /// Create a capability set with a single bit set.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let word = (bit / 64) as usize;
    let bit_in_word = bit % 64;
    let mut bits = [0u64; 4];
    match word {
      0 => bits[0] = 1u64 << bit_in_word,
      1 => bits[1] = 1u64 << bit_in_word,
      2 => bits[2] = 1u64 << bit_in_word,
      _ => bits[3] = 1u64 << bit_in_word,
    }
    Self(bits)
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    let word = match bit / 64 {
      0 => self.0[0],
      1 => self.0[1],
      2 => self.0[2],
      _ => self.0[3],
    };
    (word & (1u64 << (bit % 64))) != 0
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  /// 64-bit x86.
  X86_64,
  /// 32-bit x86.
  X86,
  /// 64-bit ARM.
  Aarch64,
  /// 32-bit PowerPC.
  Powerpc,
  /// 64-bit PowerPC.
  Powerpc64,
  /// Anything else.
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else if cfg!(target_arch = "powerpc") {
      Self::Powerpc
    } else if cfg!(target_arch = "powerpc64") {
      Self::Powerpc64
    } else {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Powerpc => "powerpc",
      Self::Powerpc64 => "powerpc64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-63)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features relevant to scalar float rounding.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  /// SSE4.1: `roundss`/`roundps` with explicit rounding-mode immediates.
  pub const SSE41: Caps = Caps::bit(3);
  pub const AVX: Caps = Caps::bit(6);
  pub const AVX512F: Caps = Caps::bit(14);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features.
pub mod aarch64 {
  use super::Caps;

  /// Scalar floating point (`frintm` and friends live here).
  pub const FP: Caps = Caps::bit(64);
  pub const NEON: Caps = Caps::bit(65);
}

// ─────────────────────────────────────────────────────────────────────────────
// PowerPC Features (bits 128-191)
// ─────────────────────────────────────────────────────────────────────────────

/// PowerPC CPU features, named after the Linux `PPC_FEATURE_*` hwcap bits.
///
/// See [`crate::hwcap`] for the translation from the auxiliary vector.
pub mod power {
  use super::Caps;

  pub const PPC32: Caps = Caps::bit(128);
  pub const PPC64: Caps = Caps::bit(129);
  /// Hardware floating point unit.
  pub const FPU: Caps = Caps::bit(130);
  pub const ALTIVEC: Caps = Caps::bit(131);
  pub const POWER4: Caps = Caps::bit(132);
  pub const POWER5: Caps = Caps::bit(133);
  /// POWER5+: adds the `frin`/`friz`/`frip`/`frim` round-to-integer family.
  pub const POWER5_PLUS: Caps = Caps::bit(134);
  /// ISA 2.05 (POWER6).
  pub const ARCH_2_05: Caps = Caps::bit(135);
  pub const POWER6_EXT: Caps = Caps::bit(136);
  /// ISA 2.06 (POWER7).
  pub const ARCH_2_06: Caps = Caps::bit(137);
  pub const VSX: Caps = Caps::bit(138);
  /// ISA 2.07 (POWER8), reported through `AT_HWCAP2`.
  pub const ARCH_2_07: Caps = Caps::bit(139);
  /// ISA 3.00 (POWER9), reported through `AT_HWCAP2`.
  pub const ARCH_3_00: Caps = Caps::bit(140);
  /// ISA 3.1 (POWER10), reported through `AT_HWCAP2`.
  pub const ARCH_3_1: Caps = Caps::bit(141);
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature Names
// ─────────────────────────────────────────────────────────────────────────────

type FeatureEntry = (u8, &'static str);

const X86_FEATURES: &[FeatureEntry] = &[(0, "sse2"), (3, "sse4.1"), (6, "avx"), (14, "avx512f")];

const AARCH64_FEATURES: &[FeatureEntry] = &[(64, "fp"), (65, "neon")];

const POWER_FEATURES: &[FeatureEntry] = &[
  (128, "ppc32"),
  (129, "ppc64"),
  (130, "fpu"),
  (131, "altivec"),
  (132, "power4"),
  (133, "power5"),
  (134, "power5+"),
  (135, "arch_2_05"),
  (136, "power6x"),
  (137, "arch_2_06"),
  (138, "vsx"),
  (139, "arch_2_07"),
  (140, "arch_3_00"),
  (141, "arch_3_1"),
];

impl Caps {
  /// Returns an iterator over the names of all set feature bits.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    X86_FEATURES
      .iter()
      .chain(AARCH64_FEATURES.iter())
      .chain(POWER_FEATURES.iter())
      .filter_map(move |(bit, name)| if self.has_bit(*bit) { Some(*name) } else { None })
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Caps(")?;
    let mut iter = self.feature_names().peekable();
    if iter.peek().is_none() {
      return write!(f, "none)");
    }
    let mut first = true;
    for name in iter {
      if !first {
        write!(f, ", ")?;
      }
      first = false;
      write!(f, "{name}")?;
    }
    write!(f, ")")
  }
}

impl core::fmt::Display for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use alloc::{format, vec::Vec};

  use super::*;

  #[test]
  fn test_caps_basic() {
    let caps = power::POWER5_PLUS | power::FPU;
    assert!(caps.has(power::POWER5_PLUS));
    assert!(!caps.has(power::ARCH_2_06));
    assert!(caps.has(Caps::NONE));
    assert_eq!(caps.count(), 2);
  }

  #[test]
  fn test_none_is_contained_everywhere() {
    assert!(Caps::NONE.has(Caps::NONE));
    assert!(x86::SSE41.has(Caps::NONE));
    assert!(Caps::NONE.is_empty());
  }

  #[test]
  fn test_family_word_placement() {
    assert_ne!(x86::SSE41.0[0], 0);
    assert_ne!(aarch64::NEON.0[1], 0);
    assert_ne!(power::POWER5_PLUS.0[2], 0);
    assert_eq!(power::POWER5_PLUS.0[0] | power::POWER5_PLUS.0[1] | power::POWER5_PLUS.0[3], 0);
  }

  #[test]
  fn test_difference() {
    let caps = power::POWER5 | power::POWER5_PLUS;
    assert_eq!(caps.difference(power::POWER5_PLUS), power::POWER5);
    assert_eq!(caps.difference(caps), Caps::NONE);
  }

  #[test]
  fn test_feature_names() {
    let caps = power::POWER5_PLUS | x86::SSE41;
    let names: Vec<_> = caps.feature_names().collect();
    assert_eq!(names, ["sse4.1", "power5+"]);
  }

  #[test]
  fn test_feature_tables_match_constants() {
    for &(bit, _) in X86_FEATURES.iter().chain(AARCH64_FEATURES).chain(POWER_FEATURES) {
      assert_eq!(Caps::bit(bit).count(), 1);
    }
    let mut bits: Vec<u8> = X86_FEATURES
      .iter()
      .chain(AARCH64_FEATURES)
      .chain(POWER_FEATURES)
      .map(|&(bit, _)| bit)
      .collect();
    let total = bits.len();
    bits.dedup();
    assert_eq!(bits.len(), total, "feature bits must be unique");
  }

  #[test]
  fn test_debug_format() {
    assert_eq!(format!("{:?}", Caps::NONE), "Caps(none)");
    assert_eq!(format!("{}", power::FPU | power::POWER5_PLUS), "Caps(fpu, power5+)");
  }

  #[test]
  fn test_arch_current() {
    let arch = Arch::current();
    #[cfg(target_arch = "x86_64")]
    assert_eq!(arch, Arch::X86_64);
    #[cfg(target_arch = "aarch64")]
    assert_eq!(arch, Arch::Aarch64);
    #[cfg(target_arch = "powerpc")]
    assert_eq!(arch, Arch::Powerpc);
    assert!(!arch.name().is_empty());
  }
}
