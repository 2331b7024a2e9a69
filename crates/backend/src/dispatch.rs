//! Kernel dispatch: selection and caching.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`] / [`try_select`]: first-match-wins over an ordered candidate list
//! - [`Dispatcher`]: write-once cell holding the resolved kernel for an entry point
//!
//! # Design
//!
//! Candidates are ordered best to worst and the list ends with a default
//! whose `requires` is [`Caps::NONE`], so selection always terminates in a
//! valid binding. Selection runs once per entry point; afterwards every call
//! is one cache load plus one indirect call, with no per-call capability test.
//!
//! # Usage
//!
//! ```
//! use backend::{candidates, dispatch::{Candidate, Dispatcher, Selected, select}};
//! use platform::caps::power;
//!
//! type FloorFn = fn(f32) -> f32;
//!
//! fn fast(x: f32) -> f32 { x }
//! fn baseline(x: f32) -> f32 { x }
//!
//! const TABLE: &[Candidate<FloorFn>] = candidates![FloorFn;
//!     "powerpc/power5plus" => Hardware, power::POWER5_PLUS => fast,
//!     "portable"           => Portable, platform::Caps::NONE => baseline,
//! ];
//!
//! fn resolve() -> Selected<FloorFn> {
//!     select(platform::caps(), TABLE)
//! }
//!
//! static DISPATCH: Dispatcher<FloorFn> = Dispatcher::new(resolve);
//! assert_eq!(DISPATCH.call_with(|f| f(1.0)), 1.0);
//! ```

use core::fmt;

use platform::Caps;

use crate::{cache::OnceCache, policy::ForceMode, tier::KernelTier};

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "powerpc/power5plus").
  pub name: &'static str,
  /// Acceleration tier.
  pub tier: KernelTier,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, tier: KernelTier, requires: Caps, func: F) -> Self {
    Self {
      name,
      tier,
      requires,
      func,
    }
  }

  /// Whether this candidate may run on a CPU with `caps`.
  #[inline]
  #[must_use]
  pub const fn is_eligible(&self, caps: Caps) -> bool {
    caps.has(self.requires)
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Name of the selected kernel.
  pub name: &'static str,
  /// Tier of the selected kernel.
  pub tier: KernelTier,
  /// The selected kernel function.
  pub func: F,
}

impl<F: Copy> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, tier: KernelTier, func: F) -> Self {
    Self { name, tier, func }
  }

  #[inline]
  const fn from_candidate(candidate: &Candidate<F>) -> Self {
    Self::new(candidate.name, candidate.tier, candidate.func)
  }
}

/// Why a candidate list produced no binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SelectError {
  /// The candidate list was empty.
  EmptyTable,
  /// No candidate's requirements were met and the list had no default.
  NoMatch,
}

impl fmt::Display for SelectError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::EmptyTable => f.write_str("candidate list is empty"),
      Self::NoMatch => f.write_str("no candidate matches the detected capabilities"),
    }
  }
}

impl core::error::Error for SelectError {}

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Select the first candidate whose requirements are met by `caps`.
///
/// # Errors
///
/// [`SelectError::EmptyTable`] for an empty list, [`SelectError::NoMatch`]
/// when nothing is eligible.
#[inline]
pub fn try_select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Result<Selected<F>, SelectError> {
  if candidates.is_empty() {
    return Err(SelectError::EmptyTable);
  }
  candidates
    .iter()
    .find(|c| c.is_eligible(caps))
    .map(Selected::from_candidate)
    .ok_or(SelectError::NoMatch)
}

/// Select the best kernel from a candidate list.
///
/// # Panics
///
/// Panics if selection fails; the candidate list must end with a
/// `Caps::NONE` default. This aborts initialization of the entry point
/// instead of leaving it unbound.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  match try_select(caps, candidates) {
    Ok(selected) => selected,
    Err(err) => panic!("kernel selection failed: {err}; candidate list must end with a Caps::NONE default"),
  }
}

/// Select honoring a [`ForceMode`].
///
/// The mode is clamped first, so forcing an unavailable tier falls back to
/// automatic selection instead of binding a kernel the CPU cannot run.
///
/// # Panics
///
/// As [`select`].
#[must_use]
pub fn select_forced<F: Copy>(caps: Caps, candidates: &[Candidate<F>], force: ForceMode) -> Selected<F> {
  let tier = match force.clamp(caps, candidates) {
    ForceMode::Auto => return select(caps, candidates),
    ForceMode::Portable => KernelTier::Portable,
    ForceMode::Hardware => KernelTier::Hardware,
  };
  match candidates.iter().find(|c| c.tier == tier && c.is_eligible(caps)) {
    Some(candidate) => Selected::from_candidate(candidate),
    None => select(caps, candidates),
  }
}

/// Build a `&[Candidate<F>]` from `name => tier, requires => func` rows.
///
/// The first argument is the kernel signature; every function is cast to
/// it, so the macro works in `const` items.
#[macro_export]
macro_rules! candidates {
  ($fty:ty; $($name:literal => $tier:ident, $requires:expr => $func:expr),+ $(,)?) => {
    &[$(
      $crate::dispatch::Candidate::new($name, $crate::KernelTier::$tier, $requires, $func as $fty)
    ),+]
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Write-once binding of one public entry point to one kernel.
///
/// The selector runs on first access; the result is cached for the process
/// lifetime and never re-derived.
///
/// # Type Parameters
///
/// - `F`: the kernel function pointer type (e.g., `fn(f32) -> f32`)
pub struct Dispatcher<F: Copy + 'static> {
  cache: OnceCache<Selected<F>>,
  selector: fn() -> Selected<F>,
}

impl<F: Copy + 'static> Dispatcher<F> {
  /// Create a new dispatcher with the given selector function.
  #[must_use]
  pub const fn new(selector: fn() -> Selected<F>) -> Self {
    Self {
      cache: OnceCache::new(),
      selector,
    }
  }

  /// Get the selected kernel, resolving it on first call.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<F> {
    self.cache.get_or_init(|| {
      let selected = (self.selector)();
      tracing::debug!(kernel = selected.name, tier = %selected.tier, "resolved kernel binding");
      selected
    })
  }

  /// Whether the binding has been resolved yet.
  #[inline]
  #[must_use]
  pub fn is_resolved(&self) -> bool {
    self.cache.get().is_some()
  }

  /// Get the name of the selected kernel.
  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.get().name
  }

  /// Get the tier of the selected kernel.
  #[inline]
  #[must_use]
  pub fn tier(&self) -> KernelTier {
    self.get().tier
  }

  /// Run `f` with the selected kernel.
  #[inline]
  pub fn call_with<R>(&self, f: impl FnOnce(F) -> R) -> R {
    f(self.get().func)
  }
}
