//! Forced kernel selection.
//!
//! [`ForceMode`] lets configuration override automatic selection. Forcing is
//! always safe: a mode that names a tier the CPU cannot run is clamped back
//! to [`ForceMode::Auto`].

use platform::Caps;

use crate::{dispatch::Candidate, tier::KernelTier};

/// Force mode for overriding automatic kernel selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForceMode {
  /// Best eligible candidate, first match wins (default).
  #[default]
  Auto,

  /// The portable default, regardless of capabilities.
  ///
  /// Useful for differential testing and for ruling out a hardware kernel
  /// while debugging.
  Portable,

  /// The first eligible hardware-tier candidate, if there is one.
  Hardware,
}

impl ForceMode {
  /// Parse from a configuration string.
  ///
  /// Accepts case-insensitive names:
  /// - `"auto"`
  /// - `"portable"`, `"scalar"`, `"software"`
  /// - `"hardware"`, `"hw"`
  #[must_use]
  pub fn parse(s: &str) -> Option<Self> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if s.eq_ignore_ascii_case("portable") || s.eq_ignore_ascii_case("scalar") || s.eq_ignore_ascii_case("software") {
      return Some(Self::Portable);
    }
    if s.eq_ignore_ascii_case("hardware") || s.eq_ignore_ascii_case("hw") {
      return Some(Self::Hardware);
    }

    None
  }

  /// Canonical lowercase name.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Hardware => "hardware",
    }
  }

  /// Clamp this mode to what `caps` can run from `candidates`.
  ///
  /// `Hardware` without an eligible hardware candidate becomes `Auto`;
  /// `Portable` without a portable candidate becomes `Auto`.
  #[must_use]
  pub fn clamp<F>(self, caps: Caps, candidates: &[Candidate<F>]) -> Self {
    let wanted = match self {
      Self::Auto => return Self::Auto,
      Self::Portable => KernelTier::Portable,
      Self::Hardware => KernelTier::Hardware,
    };
    if candidates.iter().any(|c| c.tier == wanted && caps.has(c.requires)) {
      self
    } else {
      Self::Auto
    }
  }
}

impl core::fmt::Display for ForceMode {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn k(x: f32) -> f32 {
    x
  }

  #[test]
  fn parse_accepts_aliases_case_insensitively() {
    assert_eq!(ForceMode::parse("AUTO"), Some(ForceMode::Auto));
    assert_eq!(ForceMode::parse(" portable "), Some(ForceMode::Portable));
    assert_eq!(ForceMode::parse("Scalar"), Some(ForceMode::Portable));
    assert_eq!(ForceMode::parse("hw"), Some(ForceMode::Hardware));
    assert_eq!(ForceMode::parse("turbo"), None);
    assert_eq!(ForceMode::parse(""), None);
  }

  #[test]
  fn as_str_round_trips_through_parse() {
    for mode in [ForceMode::Auto, ForceMode::Portable, ForceMode::Hardware] {
      assert_eq!(ForceMode::parse(mode.as_str()), Some(mode));
    }
  }

  #[test]
  fn hardware_clamps_to_auto_without_eligible_kernel() {
    let table = [
      Candidate::new("hw", KernelTier::Hardware, Caps::bit(134), k as fn(f32) -> f32),
      Candidate::new("portable", KernelTier::Portable, Caps::NONE, k as fn(f32) -> f32),
    ];
    assert_eq!(ForceMode::Hardware.clamp(Caps::NONE, &table), ForceMode::Auto);
    assert_eq!(ForceMode::Hardware.clamp(Caps::bit(134), &table), ForceMode::Hardware);
    assert_eq!(ForceMode::Portable.clamp(Caps::NONE, &table), ForceMode::Portable);
  }
}
