//! Binding under a POWER5+ capability override.
//!
//! Each integration test file is its own process, so the override here is
//! installed before anything in the process reads capabilities.

use mathfn::{Floorf, KernelIntrospect, KernelTier, floorf};
use platform::caps::power;

#[test]
#[cfg(not(miri))]
fn override_with_power5plus_binds_power5plus() {
  platform::set_override(Some(power::PPC32 | power::FPU | power::POWER5_PLUS));

  assert_eq!(floorf::selected_backend(), "powerpc/power5plus");
  assert_eq!(floorf::selected_tier(), KernelTier::Hardware);
  assert_eq!(Floorf::backend_name(), "powerpc/power5plus");
  assert_eq!(mathfn::floorf(2.7), 2.0);
  assert_eq!(mathfn::floorf32(-2.3), -3.0);

  // Too late: the binding is fixed.
  assert_eq!(platform::try_set_override(None), Err(platform::OverrideError::AlreadyInitialized));
  assert_eq!(floorf::selected_backend(), "powerpc/power5plus");
}
