// ── Unix platform implementation ──────────────────────────────────────────────
//
// BSD `flock(2)` advisory locks.  Locks belong to the open file description,
// so two handles opened separately on the same path contend even inside one
// process.

#![allow(unsafe_code)]

use std::{fs::File, io, os::unix::io::AsRawFd};

pub(crate) fn lock(file: &File, exclusive: bool) -> io::Result<()> {
    let op = if exclusive { libc::LOCK_EX } else { libc::LOCK_SH };
    flock(file, op | libc::LOCK_NB)
}

pub(crate) fn unlock(file: &File) -> io::Result<()> {
    flock(file, libc::LOCK_UN)
}

fn flock(file: &File, op: libc::c_int) -> io::Result<()> {
    // SAFETY: the descriptor is owned by `file`, which outlives this call.
    // flock does not retain the descriptor.
    let ret = unsafe { libc::flock(file.as_raw_fd(), op) };
    if ret == 0 {
        Ok(())
    } else {
        // EWOULDBLOCK maps to io::ErrorKind::WouldBlock.
        Err(io::Error::last_os_error())
    }
}
