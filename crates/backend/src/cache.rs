//! Write-once cache for resolved kernels.
//!
//! [`OnceCache`] has the semantics of `std::sync::OnceLock` for `Copy`
//! values, and keeps them on `no_std` targets too.
//!
//! # Caching Strategy
//!
//! - **std**: `OnceLock`
//! - **no_std with atomics**: UNINIT → INITING → READY state machine with spin-wait
//! - **no_std without atomics**: per-call computation (single-threaded targets)

#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
use core::cell::UnsafeCell;
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
use core::mem::MaybeUninit;

/// A write-once, read-many cell for `Copy` values.
///
/// The initializer runs at most once on targets with atomics; every later
/// read is a single acquire load plus a copy.
pub struct OnceCache<T: Copy> {
  #[cfg(feature = "std")]
  inner: std::sync::OnceLock<T>,

  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  state: core::sync::atomic::AtomicU8,
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  value: UnsafeCell<MaybeUninit<T>>,

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
  _marker: core::marker::PhantomData<T>,
}

// SAFETY: `value` is written exactly once, by the thread that moved `state`
// from UNINIT to INITING, and only read after `state` is READY (Release/Acquire).
#[allow(unsafe_code)]
#[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
unsafe impl<T: Copy + Send + Sync> Sync for OnceCache<T> {}

impl<T: Copy> OnceCache<T> {
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  const UNINIT: u8 = 0;
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  const INITING: u8 = 1;
  #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
  const READY: u8 = 2;

  /// Create a new empty cache.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      #[cfg(feature = "std")]
      inner: std::sync::OnceLock::new(),

      #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
      state: core::sync::atomic::AtomicU8::new(0),
      #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
      value: UnsafeCell::new(MaybeUninit::uninit()),

      #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
      _marker: core::marker::PhantomData,
    }
  }

  /// Get the cached value, initializing with `f` if not yet set.
  #[inline]
  pub fn get_or_init(&self, f: impl FnOnce() -> T) -> T {
    #[cfg(feature = "std")]
    {
      *self.inner.get_or_init(f)
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
    {
      use core::sync::atomic::Ordering;

      if let Some(value) = self.get() {
        return value;
      }

      if self
        .state
        .compare_exchange(Self::UNINIT, Self::INITING, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
      {
        let value = f();
        // SAFETY: INITING grants this thread exclusive write access.
        #[allow(unsafe_code)]
        unsafe {
          (*self.value.get()).write(value);
        }
        self.state.store(Self::READY, Ordering::Release);
        return value;
      }

      loop {
        if let Some(value) = self.get() {
          return value;
        }
        core::hint::spin_loop();
      }
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
    {
      f()
    }
  }

  /// Get the cached value if it has been initialized.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Option<T> {
    #[cfg(feature = "std")]
    {
      self.inner.get().copied()
    }

    #[cfg(all(not(feature = "std"), target_has_atomic = "8"))]
    {
      use core::sync::atomic::Ordering;

      if self.state.load(Ordering::Acquire) == Self::READY {
        // SAFETY: READY is only published after the value was written.
        #[allow(unsafe_code)]
        return Some(unsafe { (*self.value.get()).assume_init() });
      }
      None
    }

    #[cfg(all(not(feature = "std"), not(target_has_atomic = "8")))]
    {
      None
    }
  }
}

impl<T: Copy> Default for OnceCache<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn initializer_runs_once() {
    static CACHE: OnceCache<(u32, u64)> = OnceCache::new();

    let mut calls = 0;
    let first = CACHE.get_or_init(|| {
      calls += 1;
      (42, 123)
    });
    let second = CACHE.get_or_init(|| {
      calls += 1;
      (99, 999)
    });

    assert_eq!(first, (42, 123));
    assert_eq!(second, (42, 123));
    #[cfg(any(feature = "std", target_has_atomic = "8"))]
    assert_eq!(calls, 1);
  }

  #[test]
  #[cfg(any(feature = "std", target_has_atomic = "8"))]
  fn get_before_and_after_init() {
    let cache: OnceCache<u8> = OnceCache::new();
    assert_eq!(cache.get(), None);
    assert_eq!(cache.get_or_init(|| 7), 7);
    assert_eq!(cache.get(), Some(7));
  }

  #[test]
  #[cfg(feature = "std")]
  fn concurrent_readers_agree() {
    static CACHE: OnceCache<usize> = OnceCache::new();

    let handles: std::vec::Vec<_> = (0..8)
      .map(|i| std::thread::spawn(move || CACHE.get_or_init(|| i)))
      .collect();
    let seen: std::vec::Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(seen.iter().all(|&v| v == seen[0]));
  }
}
