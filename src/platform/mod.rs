// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface that the rest of the crate uses to reach
// OS facilities std does not cover (advisory locks, the registry, the console
// code page).  No `unsafe` lives here; all FFI is confined to the `win32` and
// `unix` sub-modules and never leaks outward.

use std::{fs::File, io};

#[cfg(windows)]
pub(crate) mod win32;

#[cfg(unix)]
pub(crate) mod unix;

/// Take a non-blocking advisory lock on the whole of `file`.
///
/// Contention is reported as `io::ErrorKind::WouldBlock`.
pub(crate) fn lock(file: &File, exclusive: bool) -> io::Result<()> {
    #[cfg(windows)]
    return win32::lock::lock(file, exclusive);

    #[cfg(unix)]
    return unix::lock(file, exclusive);

    #[cfg(not(any(unix, windows)))]
    {
        let _ = (file, exclusive);
        Err(io::ErrorKind::Unsupported.into())
    }
}

/// Release a lock taken with [`lock`].
pub(crate) fn unlock(file: &File) -> io::Result<()> {
    #[cfg(windows)]
    return win32::lock::unlock(file);

    #[cfg(unix)]
    return unix::unlock(file);

    #[cfg(not(any(unix, windows)))]
    {
        let _ = file;
        Err(io::ErrorKind::Unsupported.into())
    }
}
