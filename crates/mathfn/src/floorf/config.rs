//! `floorf` runtime configuration.
//!
//! One knob: `MATHFN_FLOORF_FORCE`, read once under `std`.
//!
//! | Value | Mode |
//! |-------|------|
//! | `auto` (or unset) | best eligible kernel |
//! | `portable`, `scalar`, `software`, `ppc32` | the ppc32 default |
//! | `hardware`, `hw`, `power5plus`, `frim` | first eligible hardware kernel |
//!
//! Forced modes are always clamped to detected CPU capabilities.

use backend::{ForceMode, caps::Caps};

use super::CANDIDATES;

/// Environment variable holding the requested force mode.
pub const FORCE_ENV: &str = "MATHFN_FLOORF_FORCE";

/// Full `floorf` runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorConfig {
  /// Requested force mode (env).
  pub requested_force: ForceMode,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: ForceMode,
}

/// Parse a force value, accepting the floor-specific kernel names on top of
/// the generic [`ForceMode`] names.
pub(crate) fn parse_force(value: &str) -> Option<ForceMode> {
  let value = value.trim();
  if let Some(mode) = ForceMode::parse(value) {
    return Some(mode);
  }
  if value.eq_ignore_ascii_case("ppc32") {
    return Some(ForceMode::Portable);
  }
  if value.eq_ignore_ascii_case("power5plus") || value.eq_ignore_ascii_case("frim") {
    return Some(ForceMode::Hardware);
  }
  None
}

#[cfg(feature = "std")]
fn read_env_force() -> ForceMode {
  let Ok(value) = std::env::var(FORCE_ENV) else {
    return ForceMode::Auto;
  };
  if value.trim().is_empty() {
    return ForceMode::Auto;
  }
  match parse_force(&value) {
    Some(mode) => mode,
    None => {
      tracing::warn!(var = FORCE_ENV, value = %value, "ignoring unrecognized force mode");
      ForceMode::Auto
    }
  }
}

#[cfg(feature = "std")]
fn requested_force() -> ForceMode {
  use std::sync::OnceLock;
  static FORCE: OnceLock<ForceMode> = OnceLock::new();
  *FORCE.get_or_init(read_env_force)
}

#[cfg(not(feature = "std"))]
fn requested_force() -> ForceMode {
  ForceMode::Auto
}

#[inline]
#[must_use]
pub(crate) fn config_for(requested_force: ForceMode, caps: Caps) -> FloorConfig {
  FloorConfig {
    requested_force,
    effective_force: requested_force.clamp(caps, CANDIDATES),
  }
}

/// Get the effective `floorf` configuration for the current platform.
#[inline]
#[must_use]
pub fn config() -> FloorConfig {
  config_for(requested_force(), platform::caps())
}
