// ── File handles ──────────────────────────────────────────────────────────────
//
// A `File` is either a file on disk or one of the process output streams.
// Writes to the output streams go through the shared `Console`, which flushes
// after every write; everything else is a direct pass-through to std.

use std::{
    fmt,
    fs,
    io::{self, Read, Seek, SeekFrom, Write},
    sync::Arc,
};

use tracing::debug;

use crate::{
    console::{Console, StdStream},
    error::{Error, Result},
    fs::mode::OpenMode,
    native, platform,
};

/// Advisory lock requested when opening a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockMode {
    /// No lock.
    #[default]
    None,
    /// Shared (reader) lock; coexists with other shared locks.
    Shared,
    /// Exclusive (writer) lock.
    Exclusive,
}

enum Inner {
    Disk {
        file: fs::File,
        path: String,
        locked: bool,
    },
    Console {
        console: Arc<Console>,
        stream: StdStream,
    },
}

/// An open file handle.  Closed by [`File::close`] or on drop.
pub struct File {
    inner: Inner,
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Disk { path, locked, .. } => f
                .debug_struct("File")
                .field("path", path)
                .field("locked", locked)
                .finish(),
            Inner::Console { stream, .. } => {
                f.debug_struct("File").field("stream", stream).finish()
            }
        }
    }
}

impl File {
    /// Open `path` with a C-style `mode` string.
    ///
    /// When `lock` is not [`LockMode::None`] a non-blocking advisory lock is
    /// taken right after opening; if another handle holds a conflicting lock
    /// the open fails with [`ErrorKind::WouldBlock`](crate::ErrorKind) and
    /// the file is left untouched.  Truncation for `w` modes happens only
    /// once the lock is held.
    pub fn open(path: &str, mode: &str, lock: LockMode) -> Result<File> {
        let mode: OpenMode = mode.parse()?;
        debug!(path, mode = %mode, ?lock, "open");

        let native_path = native::path("open", path)?;

        // A locked "w" open must not empty the file before the lock is held.
        let defer_truncate = lock != LockMode::None && mode.truncates();
        let mut options = mode.options();
        if defer_truncate {
            options.truncate(false);
        }
        let file = options
            .open(native_path)
            .map_err(|e| Error::io("open", path, e))?;

        let mut f = File {
            inner: Inner::Disk {
                file,
                path: path.to_owned(),
                locked: false,
            },
        };
        if lock != LockMode::None {
            f.lock(lock)?;
        }
        if defer_truncate {
            if let Inner::Disk { file, .. } = &f.inner {
                file.set_len(0).map_err(|e| Error::io("open", path, e))?;
            }
        }
        Ok(f)
    }

    pub(crate) fn console(console: Arc<Console>, stream: StdStream) -> File {
        File {
            inner: Inner::Console { console, stream },
        }
    }

    /// `true` for handles bound to stdout or stderr.
    pub fn is_console(&self) -> bool {
        matches!(self.inner, Inner::Console { .. })
    }

    /// `true` while an advisory lock taken through this handle is held.
    pub fn is_locked(&self) -> bool {
        matches!(self.inner, Inner::Disk { locked: true, .. })
    }

    /// Write from `buf`, returning the number of bytes written.
    ///
    /// Console handles write the whole buffer and flush; they report
    /// `buf.len()`.  Disk handles perform one native write, which may be
    /// short.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match &mut self.inner {
            Inner::Disk { file, path, .. } => {
                file.write(buf).map_err(|e| Error::io("write", path.as_str(), e))
            }
            Inner::Console { console, stream } => {
                console.write(*stream, buf)?;
                Ok(buf.len())
            }
        }
    }

    /// Write the whole of `buf`.
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        match &mut self.inner {
            Inner::Disk { file, path, .. } => file
                .write_all(buf)
                .map_err(|e| Error::io("write", path.as_str(), e)),
            Inner::Console { console, stream } => console.write(*stream, buf),
        }
    }

    /// Read into `buf`, returning the number of bytes read (0 at end of file).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let (file, path) = self.disk_mut("read")?;
        file.read(buf).map_err(|e| Error::io("read", path, e))
    }

    /// Read everything up to end of file, appending to `buf`.
    pub fn read_to_end(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        let (file, path) = self.disk_mut("read")?;
        file.read_to_end(buf).map_err(|e| Error::io("read", path, e))
    }

    /// Read the rest of the file as UTF-8 text.
    pub fn read_to_string(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::InvalidEncoding {
            op: "read",
            what: "file contents",
            lossy: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let (file, path) = self.disk_mut("seek")?;
        file.seek(pos).map_err(|e| Error::io("seek", path, e))
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.inner {
            Inner::Disk { file, path, .. } => {
                file.flush().map_err(|e| Error::io("flush", path.as_str(), e))
            }
            // Console writes are flushed as they happen.
            Inner::Console { .. } => Ok(()),
        }
    }

    /// Take an advisory lock on this handle.
    pub fn lock(&mut self, mode: LockMode) -> Result<()> {
        let exclusive = match mode {
            LockMode::None => return Ok(()),
            LockMode::Shared => false,
            LockMode::Exclusive => true,
        };
        match &mut self.inner {
            Inner::Disk { file, path, locked } => {
                platform::lock(file, exclusive).map_err(|e| Error::io("lock", path.as_str(), e))?;
                *locked = true;
                Ok(())
            }
            Inner::Console { .. } => Err(Error::Unsupported { op: "lock" }),
        }
    }

    /// Release a lock taken with [`File::lock`].  A no-op when none is held.
    pub fn unlock(&mut self) -> Result<()> {
        if let Inner::Disk { file, path, locked } = &mut self.inner {
            if *locked {
                platform::unlock(file).map_err(|e| Error::io("unlock", path.as_str(), e))?;
                *locked = false;
            }
        }
        Ok(())
    }

    /// Close the handle.
    ///
    /// With `unlock` set, a held advisory lock is released explicitly before
    /// the handle is closed; otherwise it is released by the OS on close.
    pub fn close(mut self, unlock: bool) -> Result<()> {
        if unlock {
            self.unlock()?;
        }
        self.flush()
    }

    fn disk_mut(&mut self, op: &'static str) -> Result<(&mut fs::File, &str)> {
        match &mut self.inner {
            Inner::Disk { file, path, .. } => Ok((file, path.as_str())),
            Inner::Console { .. } => Err(Error::Unsupported { op }),
        }
    }
}

impl Write for File {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        File::write(self, buf).map_err(into_io)
    }

    fn flush(&mut self) -> io::Result<()> {
        File::flush(self).map_err(into_io)
    }
}

impl Read for File {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        File::read(self, buf).map_err(into_io)
    }
}

fn into_io(e: Error) -> io::Error {
    match e {
        Error::Io { source, .. } => source,
        other => io::Error::other(other),
    }
}
