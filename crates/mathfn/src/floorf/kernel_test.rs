//! Kernel testing utilities for `floorf`.
//!
//! Runs every `floorf` kernel the current CPU can execute and returns each
//! result. Used by fuzz targets and tests to verify cross-kernel agreement.
//!
//! # Design
//!
//! The first entry is always the portable ppc32 kernel, the default every
//! table ends with. Callers compare all entries against each other or
//! against `f32::floor`; NaN inputs produce NaN from every kernel, so
//! compare those by class rather than by bits.

use alloc::vec::Vec;

/// Result from running a kernel.
#[derive(Debug, Clone, Copy)]
pub struct KernelResult {
  /// Kernel name (e.g., "portable/ppc32", "powerpc/power5plus")
  pub name: &'static str,
  /// Kernel output
  pub value: f32,
}

/// Run all available `floorf` kernels on `x`.
///
/// Hardware kernels are included only when [`platform::caps()`] reports
/// the features they need.
#[must_use]
pub fn run_all_floorf_kernels(x: f32) -> Vec<KernelResult> {
  let caps = platform::caps();
  let mut results = Vec::with_capacity(super::CANDIDATES.len());

  if let Some(default) = super::CANDIDATES.last() {
    results.push(KernelResult {
      name: default.name,
      value: (default.func)(x),
    });
  }

  let accelerated = super::CANDIDATES.split_last().map_or(&[][..], |(_, rest)| rest);
  for candidate in accelerated.iter().filter(|c| c.is_eligible(caps)) {
    results.push(KernelResult {
      name: candidate.name,
      value: (candidate.func)(x),
    });
  }

  // Bit-level emulation of `frim`; safe on every CPU.
  if !results.iter().any(|r| r.name == "powerpc/power5plus") {
    results.push(KernelResult {
      name: "powerpc/power5plus",
      value: super::power5plus::floorf_power5plus(x),
    });
  }

  results
}

/// Verify every available kernel agrees with `f32::floor` on `x`.
///
/// # Errors
///
/// Returns the first disagreeing kernel with its output.
#[cfg(feature = "std")]
pub fn verify_floorf_kernels(x: f32) -> Result<(), KernelResult> {
  let expected = x.floor();
  for result in run_all_floorf_kernels(x) {
    let agrees = if expected.is_nan() {
      result.value.is_nan()
    } else {
      result.value.to_bits() == expected.to_bits()
    };
    if !agrees {
      return Err(result);
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_entry_is_portable_default() {
    let results = run_all_floorf_kernels(1.5);
    assert_eq!(results[0].name, "portable/ppc32");
    assert!(results.iter().any(|r| r.name == "powerpc/power5plus"));
  }

  #[test]
  fn every_kernel_agrees() {
    for x in [2.7f32, -2.3, -0.0, 0.5, -0.5, 8_388_607.5, -1.0e-40, f32::MIN, f32::INFINITY] {
      let results = run_all_floorf_kernels(x);
      for r in &results {
        assert_eq!(r.value.to_bits(), results[0].value.to_bits(), "{} disagrees at {x}", r.name);
      }
    }
  }

  #[test]
  #[cfg(feature = "std")]
  fn verify_against_std() {
    for x in [2.7f32, -2.3, f32::NAN, -f32::NAN, 1.0e30, -3.5] {
      assert!(verify_floorf_kernels(x).is_ok(), "mismatch at {x}");
    }
  }
}
