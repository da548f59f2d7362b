// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` and
// `platform::unix`, which hold all OS FFI.
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! UTF-8 file-system, environment and theme access.
//!
//! Every operation takes and returns UTF-8 strings and translates them to the
//! host's native encoding at the boundary: UTF-16 on Windows, byte strings on
//! Unix.  The typed API in [`fs`], [`env`] and [`theme`] reports failures
//! through [`Error`]; [`compat`] collapses them into the boolean/null results
//! that legacy callers expect.

pub mod adapter;
pub mod compat;
pub mod config;
pub mod console;
pub mod env;
pub mod error;
pub mod fs;
pub mod theme;

mod native;
mod platform;

pub use adapter::Adapter;
pub use error::{Error, ErrorKind, Result};
