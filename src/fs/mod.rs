// ── File-system operations ────────────────────────────────────────────────────
//
// Path-level operations (stat, mkdir, rmdir, rename, chmod, remove) plus the
// `File` and `Dir` handle types.  Each operation converts its UTF-8 path at
// the boundary and makes exactly one native call.

use std::{fs, time::SystemTime};

use crate::{
    error::{Error, Result},
    native,
};

mod dir;
mod file;
pub mod mode;

pub use dir::Dir;
pub use file::{File, LockMode};
pub use mode::OpenMode;

/// What a path refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
    Symlink,
    #[default]
    Other,
}

/// Snapshot of a file's metadata, as returned by [`stat`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStat {
    pub kind: FileKind,
    pub len: u64,
    pub readonly: bool,
    /// Permission bits.  On Windows these are synthesized from the
    /// read-only attribute the way the C runtime's `stat` does.
    pub mode: u32,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
}

impl FileStat {
    fn from_metadata(md: &fs::Metadata) -> Self {
        let ft = md.file_type();
        let kind = if ft.is_dir() {
            FileKind::Dir
        } else if ft.is_file() {
            FileKind::File
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else {
            FileKind::Other
        };
        let readonly = md.permissions().readonly();
        FileStat {
            kind,
            len: md.len(),
            readonly,
            mode: permission_bits(md, kind, readonly),
            modified: md.modified().ok(),
            accessed: md.accessed().ok(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

#[cfg(unix)]
fn permission_bits(md: &fs::Metadata, _kind: FileKind, _readonly: bool) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(_md: &fs::Metadata, kind: FileKind, readonly: bool) -> u32 {
    // Read for everyone, write unless read-only, execute for directories.
    let mut bits = 0o444;
    if !readonly {
        bits |= 0o222;
    }
    if kind == FileKind::Dir {
        bits |= 0o111;
    }
    bits
}

/// Open a file; see [`File::open`].
pub fn open(path: &str, mode: &str, lock: LockMode) -> Result<File> {
    File::open(path, mode, lock)
}

/// Open a directory stream; see [`Dir::open`].
pub fn open_dir(path: &str) -> Result<Dir> {
    Dir::open(path)
}

/// Metadata for `path`, following symlinks.
pub fn stat(path: &str) -> Result<FileStat> {
    let p = native::path("stat", path)?;
    let md = fs::metadata(p).map_err(|e| Error::io("stat", path, e))?;
    Ok(FileStat::from_metadata(&md))
}

/// Create a single directory.  `mode` is applied on Unix (subject to the
/// umask) and ignored elsewhere.
pub fn mkdir(path: &str, mode: u32) -> Result<()> {
    let p = native::path("mkdir", path)?;
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(p).map_err(|e| Error::io("mkdir", path, e))
}

/// Remove an empty directory.
pub fn rmdir(path: &str) -> Result<()> {
    let p = native::path("rmdir", path)?;
    fs::remove_dir(p).map_err(|e| Error::io("rmdir", path, e))
}

/// Rename `old` to `new`, replacing `new` if it is a file.
pub fn rename(old: &str, new: &str) -> Result<()> {
    let from = native::path("rename", old)?;
    let to = native::path("rename", new)?;
    fs::rename(from, to).map_err(|e| Error::io("rename", format!("{old} -> {new}"), e))
}

/// Change permission bits.
///
/// On Windows only the owner-write bit (`0o200`) is meaningful: clearing it
/// sets the read-only attribute.
pub fn chmod(path: &str, mode: u32) -> Result<()> {
    let p = native::path("chmod", path)?;

    #[cfg(unix)]
    let perms = {
        use std::os::unix::fs::PermissionsExt;
        fs::Permissions::from_mode(mode)
    };

    #[cfg(not(unix))]
    let perms = {
        let mut perms = fs::metadata(p)
            .map_err(|e| Error::io("chmod", path, e))?
            .permissions();
        perms.set_readonly(mode & 0o200 == 0);
        perms
    };

    fs::set_permissions(p, perms).map_err(|e| Error::io("chmod", path, e))
}

/// Remove a file.  Directories are rejected; use [`rmdir`].
pub fn remove(path: &str) -> Result<()> {
    let p = native::path("remove", path)?;
    fs::remove_file(p).map_err(|e| Error::io("remove", path, e))
}
