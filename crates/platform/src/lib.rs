//! CPU capability detection for the mathfn workspace.
//!
//! This crate is the single source of truth for "what can this CPU run?".
//! Dispatchers query [`caps()`] instead of doing ad-hoc detection, so every
//! kernel choice in the process is made against the same, once-detected set.
//!
//! # Core Types
//!
//! - [`Caps`]: 256-bit feature bitset
//! - [`Arch`]: compilation target architecture
//! - [`Description`]: printable summary of the two
//!
//! # Usage
//!
//! ```
//! use platform::caps::power;
//!
//! let caps = platform::caps();
//! if caps.has(power::POWER5_PLUS) {
//!     // `frim` is available
//! }
//! ```
//!
//! # Design
//!
//! 1. **Detect once**: runtime detection is cached (`OnceLock` with `std`, atomics without).
//! 2. **Compile-time first**: `cfg!(target_feature)` bits are always included, so `no_std` builds
//!    still see what the target guarantees.
//! 3. **Overrides are pre-init only**: the capability set never changes after the first read.
//! 4. **Miri-safe**: under Miri the set is always empty.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;
pub mod hwcap;

use core::fmt;

pub use caps::{Arch, Caps};
pub use detect::{OverrideError, caps_static, clear_override, detect_uncached, has_override, set_override, try_set_override};

/// Get the detected CPU capabilities.
///
/// The first call performs detection (or adopts an override); every later
/// call returns the cached set.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get()
}

/// Printable summary of the current platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Description {
  /// Compilation target architecture.
  pub arch: Arch,
  /// Detected capabilities.
  pub caps: Caps,
}

impl fmt::Display for Description {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.arch, self.caps)
  }
}

/// Describe the current platform.
#[inline]
#[must_use]
pub fn describe() -> Description {
  Description {
    arch: Arch::current(),
    caps: caps(),
  }
}
