//! Kernel selection and dispatch for the mathfn workspace.
//!
//! An entry point is bound to one of several interchangeable kernels exactly
//! once, from the capability set reported by `platform`:
//!
//! - **Selection**: an ordered [`Candidate`](dispatch::Candidate) list, first match wins, ending in
//!   a `Caps::NONE` default.
//! - **Binding**: a [`Dispatcher`](dispatch::Dispatcher) caches the [`Selected`](dispatch::Selected)
//!   kernel in a write-once cell; every later call is a single indirect call.
//! - **Forcing**: [`ForceMode`] overrides automatic choice, clamped to what the CPU can run.
//!
//! # Usage
//!
//! ```
//! use backend::{candidates, dispatch::{Candidate, Dispatcher, Selected, select}};
//! use backend::caps::{Caps, power};
//!
//! type FloorFn = fn(f32) -> f32;
//!
//! fn frim(x: f32) -> f32 { x }
//! fn ppc32(x: f32) -> f32 { x }
//!
//! fn resolve() -> Selected<FloorFn> {
//!     select(platform::caps(), candidates![FloorFn;
//!         "powerpc/power5plus" => Hardware, power::POWER5_PLUS => frim,
//!         "portable/ppc32"     => Portable, Caps::NONE         => ppc32,
//!     ])
//! }
//!
//! static FLOORF: Dispatcher<FloorFn> = Dispatcher::new(resolve);
//! let _ = FLOORF.backend_name();
//! ```

// Fallibility discipline: deny unwrap/expect in production, allow in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod caps;
pub mod dispatch;
pub mod policy;
pub mod tier;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Dispatcher, SelectError, Selected, select, select_forced, try_select};
// Re-export platform for convenience.
pub use platform;
pub use policy::ForceMode;
pub use tier::KernelTier;
