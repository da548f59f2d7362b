use std::{fs::File, io, os::windows::io::AsRawHandle};

use windows::Win32::{
    Foundation::{ERROR_LOCK_VIOLATION, HANDLE},
    Storage::FileSystem::{
        LockFileEx, UnlockFileEx, LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY,
        LOCK_FILE_FLAGS,
    },
    System::IO::OVERLAPPED,
};

/// Lock the whole file (offset 0, length u64::MAX) without blocking.
pub(crate) fn lock(file: &File, exclusive: bool) -> io::Result<()> {
    let flags = if exclusive {
        LOCKFILE_FAIL_IMMEDIATELY | LOCKFILE_EXCLUSIVE_LOCK
    } else {
        LOCKFILE_FAIL_IMMEDIATELY
    };
    lock_with(file, flags)
}

pub(crate) fn unlock(file: &File) -> io::Result<()> {
    let handle = HANDLE(file.as_raw_handle());
    let mut overlapped = OVERLAPPED::default();

    // SAFETY: `handle` is owned by `file`, which outlives this call.
    // `overlapped` is zeroed (offset 0) and lives on this stack frame for the
    // whole synchronous call.
    unsafe { UnlockFileEx(handle, 0, u32::MAX, u32::MAX, &mut overlapped) }
        .map_err(to_io_error)
}

fn lock_with(file: &File, flags: LOCK_FILE_FLAGS) -> io::Result<()> {
    let handle = HANDLE(file.as_raw_handle());
    let mut overlapped = OVERLAPPED::default();

    // SAFETY: same invariants as `unlock`.  LOCKFILE_FAIL_IMMEDIATELY makes
    // the call return instead of pending, so `overlapped` is never referenced
    // after we return.
    unsafe { LockFileEx(handle, flags, 0, u32::MAX, u32::MAX, &mut overlapped) }
        .map_err(to_io_error)
}

fn to_io_error(e: windows::core::Error) -> io::Error {
    if e.code() == ERROR_LOCK_VIOLATION.to_hresult() {
        return io::Error::new(io::ErrorKind::WouldBlock, "file is locked by another handle");
    }
    // Win32 errors arrive as 0x8007xxxx HRESULTs; the low word is the code.
    io::Error::from_raw_os_error(e.code().0 & 0xFFFF)
}
