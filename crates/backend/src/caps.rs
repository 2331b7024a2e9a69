//! Re-exported capability types and constants.
//!
//! Kernel crates import everything they need for candidate tables from
//! `backend::caps` instead of reaching into `platform` directly.
//!
//! ```
//! use backend::caps::{Caps, power};
//!
//! fn wants_frim(caps: Caps) -> bool {
//!     caps.has(power::POWER5_PLUS)
//! }
//! assert!(!wants_frim(Caps::NONE));
//! ```

pub use platform::caps::{Arch, Caps};

/// x86/x86_64 feature constants.
pub mod x86 {
  pub use platform::caps::x86::*;
}

/// aarch64 feature constants.
pub mod aarch64 {
  pub use platform::caps::aarch64::*;
}

/// PowerPC feature constants.
pub mod power {
  pub use platform::caps::power::*;
}
