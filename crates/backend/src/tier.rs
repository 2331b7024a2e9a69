//! Kernel acceleration tiers.
//!
//! | Tier | Name | Description |
//! |------|------|-------------|
//! | 0 | Portable | Plain Rust, always available; the mandatory default |
//! | 1 | Hardware | Dedicated instructions, gated on detected capability bits |

use core::fmt;

/// Kernel acceleration tier.
///
/// Ordered lowest (always available) to highest, so `tier >= KernelTier::Hardware`
/// reads as "uses dedicated instructions".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KernelTier {
  /// Portable implementation. Always correct, always selectable.
  #[default]
  Portable = 0,

  /// Hardware instruction implementation.
  ///
  /// Examples: POWER5+ `frim`, SSE4.1 `roundss`, aarch64 `frintm`.
  Hardware = 1,
}

impl KernelTier {
  /// All tiers in ascending order.
  pub const ALL: [Self; 2] = [Self::Portable, Self::Hardware];

  /// Convert to numeric value.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Human-readable tier name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Portable => "portable",
      Self::Hardware => "hardware",
    }
  }

  /// Whether kernels of this tier need capability bits to be selected.
  #[inline]
  #[must_use]
  pub const fn requires_runtime_detection(self) -> bool {
    matches!(self, Self::Hardware)
  }
}

impl fmt::Display for KernelTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tier_ordering() {
    assert!(KernelTier::Portable < KernelTier::Hardware);
    assert_eq!(KernelTier::ALL[0], KernelTier::Portable);
  }

  #[test]
  fn tier_values_and_names() {
    assert_eq!(KernelTier::Portable.as_u8(), 0);
    assert_eq!(KernelTier::Hardware.as_u8(), 1);
    assert_eq!(KernelTier::Portable.name(), "portable");
    assert_eq!(KernelTier::Hardware.name(), "hardware");
  }

  #[test]
  fn runtime_detection() {
    assert!(!KernelTier::Portable.requires_runtime_detection());
    assert!(KernelTier::Hardware.requires_runtime_detection());
  }

  #[test]
  fn default_is_portable() {
    assert_eq!(KernelTier::default(), KernelTier::Portable);
  }
}
