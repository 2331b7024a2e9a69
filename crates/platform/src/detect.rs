//! One-time CPU capability detection.
//!
//! [`get()`] returns the process-wide capability set. It is computed once
//! (compile-time `cfg!(target_feature)` bits unioned with runtime bits) and
//! cached for the rest of the process:
//!
//! - `std`: `OnceLock`
//! - `no_std` with 64-bit atomics: an UNINIT → INITING → READY state machine
//! - `no_std` without 64-bit atomics: compile-time bits only, recomputed per call
//!
//! # Overrides
//!
//! Bare-metal deployments and tests can supply capabilities up front with
//! [`try_set_override`]. Overrides are pre-init only: once [`get()`] has
//! cached a result the set of capabilities is frozen and further overrides
//! are rejected with [`OverrideError::AlreadyInitialized`].
//!
//! # Miri
//!
//! Under Miri detection always yields [`Caps::NONE`], steering every
//! dispatcher onto its portable fallback.

use core::fmt;

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Why a capability override was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OverrideError {
  /// Detection already ran and its result is cached.
  AlreadyInitialized,
  /// This target has no storage for overrides (`no_std` without 64-bit atomics).
  Unsupported,
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AlreadyInitialized => f.write_str("capabilities already detected and cached"),
      Self::Unsupported => f.write_str("capability overrides unsupported on this target"),
    }
  }
}

impl core::error::Error for OverrideError {}

// ─────────────────────────────────────────────────────────────────────────────
// Cache + Override (std)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
use std::sync::{OnceLock, RwLock};

#[cfg(feature = "std")]
static STD_CACHE: OnceLock<Caps> = OnceLock::new();

#[cfg(feature = "std")]
static OVERRIDE: RwLock<Option<Caps>> = RwLock::new(None);

/// Set the capability override.
///
/// # Panics
///
/// Panics if detection has already been cached, or if the target cannot
/// store overrides. Use [`try_set_override`] to handle those cases.
#[cold]
pub fn set_override(value: Option<Caps>) {
  if let Err(err) = try_set_override(value) {
    panic!("platform::set_override failed: {err}");
  }
}

/// Try to set the capability override.
///
/// Passing `None` clears a previously set override. Must run before the
/// first [`get()`].
#[cold]
pub fn try_set_override(value: Option<Caps>) -> Result<(), OverrideError> {
  #[cfg(feature = "std")]
  {
    if STD_CACHE.get().is_some() {
      return Err(OverrideError::AlreadyInitialized);
    }
    match OVERRIDE.write() {
      Ok(mut guard) => {
        *guard = value;
        Ok(())
      }
      Err(_) => Err(OverrideError::Unsupported),
    }
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::try_set_override(value)
  }

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
  {
    let _ = value;
    Err(OverrideError::Unsupported)
  }
}

/// Clear the capability override.
///
/// # Panics
///
/// Panics under the same conditions as [`set_override`].
#[cold]
pub fn clear_override() {
  set_override(None);
}

/// Check if an override is set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  #[cfg(feature = "std")]
  {
    OVERRIDE.read().map(|g| g.is_some()).unwrap_or(false)
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::get_override().is_some()
  }

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
  {
    false
  }
}

#[cold]
#[cfg_attr(miri, allow(dead_code))]
fn detect_with_override() -> Caps {
  #[cfg(feature = "std")]
  {
    if let Ok(guard) = OVERRIDE.read()
      && let Some(ov) = *guard
    {
      tracing::debug!(caps = ?ov, "using capability override");
      return ov;
    }
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    if let Some(ov) = atomic_cache::get_override() {
      return ov;
    }
  }

  let caps = detect_uncached();
  tracing::debug!(arch = %crate::Arch::current(), caps = ?caps, "detected cpu capabilities");
  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Atomic Cache (no_std with 64-bit atomics)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
mod atomic_cache {
  use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

  use super::{Caps, OverrideError};

  const STATE_UNINIT: u8 = 0;
  const STATE_INITING: u8 = 1;
  const STATE_READY: u8 = 2;

  static STATE: AtomicU8 = AtomicU8::new(STATE_UNINIT);
  static CACHED: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

  static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
  static OVERRIDE_BITS: [AtomicU64; 4] = [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)];

  fn load(words: &[AtomicU64; 4]) -> Caps {
    let [a, b, c, d] = words;
    Caps([
      a.load(Ordering::Acquire),
      b.load(Ordering::Acquire),
      c.load(Ordering::Acquire),
      d.load(Ordering::Acquire),
    ])
  }

  fn store(words: &[AtomicU64; 4], caps: Caps) {
    for (slot, word) in words.iter().zip(caps.0) {
      slot.store(word, Ordering::Release);
    }
  }

  pub(super) fn get_or_init(f: fn() -> Caps) -> Caps {
    if STATE.load(Ordering::Acquire) == STATE_READY {
      return load(&CACHED);
    }

    match STATE.compare_exchange(STATE_UNINIT, STATE_INITING, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let caps = f();
        store(&CACHED, caps);
        STATE.store(STATE_READY, Ordering::Release);
        caps
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != STATE_READY {
          core::hint::spin_loop();
        }
        load(&CACHED)
      }
    }
  }

  pub(super) fn try_set_override(value: Option<Caps>) -> Result<(), OverrideError> {
    if STATE.load(Ordering::Acquire) != STATE_UNINIT {
      return Err(OverrideError::AlreadyInitialized);
    }
    match value {
      Some(caps) => {
        store(&OVERRIDE_BITS, caps);
        OVERRIDE_SET.store(true, Ordering::Release);
      }
      None => OVERRIDE_SET.store(false, Ordering::Release),
    }
    Ok(())
  }

  pub(super) fn get_override() -> Option<Caps> {
    OVERRIDE_SET.load(Ordering::Acquire).then(|| load(&OVERRIDE_BITS))
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get the process-wide capability set, detecting on first call.
#[inline]
#[must_use]
pub fn get() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    *STD_CACHE.get_or_init(detect_with_override)
  }

  #[cfg(all(not(miri), not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::get_or_init(detect_with_override)
  }

  #[cfg(all(not(miri), not(feature = "std"), not(target_has_atomic = "64")))]
  {
    caps_static()
  }
}

/// Detect capabilities without caching or overrides.
#[must_use]
pub fn detect_uncached() -> Caps {
  caps_static() | runtime()
}

/// Capabilities known at compile time from `-C target-feature` / `target-cpu`.
#[must_use]
pub const fn caps_static() -> Caps {
  #[allow(unused_mut)]
  let mut caps = Caps::NONE;

  #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
  {
    use crate::caps::x86;
    if cfg!(target_feature = "sse2") {
      caps = caps.union(x86::SSE2);
    }
    if cfg!(target_feature = "sse4.1") {
      caps = caps.union(x86::SSE41);
    }
    if cfg!(target_feature = "avx") {
      caps = caps.union(x86::AVX);
    }
    if cfg!(target_feature = "avx512f") {
      caps = caps.union(x86::AVX512F);
    }
  }

  #[cfg(target_arch = "aarch64")]
  {
    use crate::caps::aarch64;
    // FP is architecturally mandatory on every aarch64 target Rust supports.
    caps = caps.union(aarch64::FP);
    if cfg!(target_feature = "neon") {
      caps = caps.union(aarch64::NEON);
    }
  }

  #[cfg(any(target_arch = "powerpc", target_arch = "powerpc64"))]
  {
    use crate::caps::power;
    if cfg!(target_arch = "powerpc64") {
      caps = caps.union(power::PPC64);
    } else {
      caps = caps.union(power::PPC32);
    }
    if cfg!(target_feature = "hard-float") {
      caps = caps.union(power::FPU);
    }
    if cfg!(target_feature = "altivec") {
      caps = caps.union(power::ALTIVEC);
    }
    if cfg!(target_feature = "vsx") {
      caps = caps.union(power::VSX);
    }
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime Detection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
fn runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("sse2") {
    caps |= x86::SSE2;
  }
  if std::arch::is_x86_feature_detected!("sse4.1") {
    caps |= x86::SSE41;
  }
  if std::arch::is_x86_feature_detected!("avx") {
    caps |= x86::AVX;
  }
  if std::arch::is_x86_feature_detected!("avx512f") {
    caps |= x86::AVX512F;
  }
  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn runtime() -> Caps {
  use crate::caps::aarch64;

  if std::arch::is_aarch64_feature_detected!("neon") {
    aarch64::FP | aarch64::NEON
  } else {
    aarch64::FP
  }
}

/// Runtime PowerPC detection via `/proc/self/auxv`.
///
/// `is_powerpc_feature_detected!` is unstable, and it does not expose the
/// POWER5+ bit anyway, so the auxiliary vector is parsed directly.
#[cfg(all(
  feature = "std",
  any(target_arch = "powerpc", target_arch = "powerpc64"),
  any(target_os = "linux", target_os = "android")
))]
fn runtime() -> Caps {
  let (hwcap, hwcap2) = read_auxv_hwcaps().unwrap_or((0, 0));
  crate::hwcap::caps_from_hwcap(hwcap, hwcap2)
}

#[cfg(all(
  feature = "std",
  any(target_arch = "powerpc", target_arch = "powerpc64"),
  any(target_os = "linux", target_os = "android")
))]
fn read_auxv_hwcaps() -> Option<(u64, u64)> {
  // ELF auxiliary vector entry types
  const AT_NULL: usize = 0;
  const AT_HWCAP: usize = 16;
  const AT_HWCAP2: usize = 26;
  const WORD: usize = core::mem::size_of::<usize>();

  let auxv = std::fs::read("/proc/self/auxv").ok()?;

  let mut hwcap = 0u64;
  let mut hwcap2 = 0u64;
  for entry in auxv.chunks_exact(2 * WORD) {
    let (key, val) = entry.split_at(WORD);
    let a_type = usize::from_ne_bytes(key.try_into().ok()?);
    let a_val = usize::from_ne_bytes(val.try_into().ok()?) as u64;
    match a_type {
      AT_HWCAP => hwcap = a_val,
      AT_HWCAP2 => hwcap2 = a_val,
      AT_NULL => break,
      _ => {}
    }
  }
  Some((hwcap, hwcap2))
}

/// Everything else relies on compile-time features only.
#[cfg(not(any(
  all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")),
  all(feature = "std", target_arch = "aarch64"),
  all(
    feature = "std",
    any(target_arch = "powerpc", target_arch = "powerpc64"),
    any(target_os = "linux", target_os = "android")
  )
)))]
const fn runtime() -> Caps {
  Caps::NONE
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
