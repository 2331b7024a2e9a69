//! Single-precision floor with one-time kernel binding.
//!
//! # Kernel Hierarchy
//!
//! - x86_64: SSE4.1 `roundss` > POWER5+ emulation > portable
//! - aarch64: `frintm` > POWER5+ emulation > portable
//! - powerpc and everything else: POWER5+ `frim` semantics > portable (ppc32)
//!
//! The POWER5+ kernel is plain Rust, so it appears in every table; only a
//! capability set carrying [`power::POWER5_PLUS`] selects it.
//!
//! # Binding
//!
//! [`DISPATCH`] resolves on the first call to [`crate::floorf`] or
//! [`crate::floorf32`]: detect capabilities, apply the configured force mode,
//! pick the first eligible candidate. Both entry points read the same cell,
//! so they are bound to the same kernel for the life of the process.

#[cfg(target_arch = "aarch64")]
mod aarch64;
pub(crate) mod config;
#[cfg(feature = "alloc")]
pub mod kernel_test;
pub(crate) mod portable;
pub(crate) mod power5plus;
#[cfg(target_arch = "x86_64")]
mod x86_64;

#[cfg(target_arch = "aarch64")]
use backend::caps::aarch64 as aarch64_caps;
#[cfg(target_arch = "x86_64")]
use backend::caps::x86;
use backend::{
  Candidate, Dispatcher, KernelTier, Selected,
  caps::{Caps, power},
  candidates, select_forced,
};

pub use config::{FloorConfig, config};

/// Kernel signature shared by every `floorf` candidate.
pub type FloorFn = fn(f32) -> f32;

// ─────────────────────────────────────────────────────────────────────────────
// Candidate Tables
// ─────────────────────────────────────────────────────────────────────────────
//
// Ordered best to worst; the last row requires nothing.

#[cfg(target_arch = "x86_64")]
pub(crate) const CANDIDATES: &[Candidate<FloorFn>] = candidates![FloorFn;
  "x86_64/sse4.1"      => Hardware, x86::SSE41         => x86_64::floorf_sse41,
  "powerpc/power5plus" => Hardware, power::POWER5_PLUS => power5plus::floorf_power5plus,
  "portable/ppc32"     => Portable, Caps::NONE         => portable::floorf_ppc32,
];

#[cfg(target_arch = "aarch64")]
pub(crate) const CANDIDATES: &[Candidate<FloorFn>] = candidates![FloorFn;
  "aarch64/frintm"     => Hardware, aarch64_caps::NEON => aarch64::floorf_frintm,
  "powerpc/power5plus" => Hardware, power::POWER5_PLUS => power5plus::floorf_power5plus,
  "portable/ppc32"     => Portable, Caps::NONE         => portable::floorf_ppc32,
];

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) const CANDIDATES: &[Candidate<FloorFn>] = candidates![FloorFn;
  "powerpc/power5plus" => Hardware, power::POWER5_PLUS => power5plus::floorf_power5plus,
  "portable/ppc32"     => Portable, Caps::NONE         => portable::floorf_ppc32,
];

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Select the `floorf` kernel for an explicit capability set.
///
/// Pure: no detection, no configuration. With only [`power::POWER5_PLUS`]
/// this yields `"powerpc/power5plus"`; with [`Caps::NONE`] it yields
/// `"portable/ppc32"`.
#[inline]
#[must_use]
pub fn select_for_caps(caps: Caps) -> Selected<FloorFn> {
  backend::select(caps, CANDIDATES)
}

fn select_configured() -> Selected<FloorFn> {
  let caps = platform::caps();
  let cfg = config();
  if cfg.requested_force != cfg.effective_force {
    tracing::debug!(
      requested = %cfg.requested_force,
      effective = %cfg.effective_force,
      "floorf force mode clamped to detected capabilities"
    );
  }
  select_forced(caps, CANDIDATES, cfg.effective_force)
}

pub(crate) static DISPATCH: Dispatcher<FloorFn> = Dispatcher::new(select_configured);

/// Name of the kernel `floorf` is bound to.
///
/// Resolves the binding if no call has done so yet.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  DISPATCH.backend_name()
}

/// Tier of the kernel `floorf` is bound to.
#[inline]
#[must_use]
pub fn selected_tier() -> KernelTier {
  DISPATCH.tier()
}
