//! Kernel dispatch introspection.
//!
//! Reports which kernel each entry point is bound to, without touching the
//! hot path.
//!
//! # Examples
//!
//! ```
//! use mathfn::{DispatchInfo, Floorf, KernelIntrospect};
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! println!("floorf backend: {}", Floorf::backend_name());
//! ```

use core::fmt;

/// Information about the current dispatch configuration.
///
/// A zero-allocation view of the architecture and detected capabilities.
#[derive(Clone, Copy)]
pub struct DispatchInfo {
  platform: platform::Description,
}

impl DispatchInfo {
  /// Returns dispatch info for the current platform.
  ///
  /// Detection is cached after the first invocation.
  #[inline]
  #[must_use]
  pub fn current() -> Self {
    Self {
      platform: platform::describe(),
    }
  }

  /// Returns the platform description.
  #[inline]
  #[must_use]
  pub fn platform(&self) -> platform::Description {
    self.platform
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.platform)
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo")
      .field("platform", &format_args!("{}", self.platform))
      .finish()
  }
}

/// Trait for entry points that support kernel introspection.
pub trait KernelIntrospect {
  /// Returns the currently bound kernel name.
  ///
  /// e.g. `"powerpc/power5plus"`, `"x86_64/sse4.1"`, `"portable/ppc32"`.
  fn backend_name() -> &'static str;
}

/// Marker type for the `floorf` entry point.
#[derive(Clone, Copy, Debug, Default)]
pub struct Floorf;

impl KernelIntrospect for Floorf {
  #[inline]
  fn backend_name() -> &'static str {
    crate::floorf::selected_backend()
  }
}
