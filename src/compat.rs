// ── Legacy compatibility layer ────────────────────────────────────────────────
//
// The legacy boolean/null contract: every failure collapses into `false`,
// `None`, `-1` or a zero byte count, with no way to tell causes apart.  Use
// the typed API in `fs`/`env`/`theme` for new code.
//
// Collapsed errors are logged at debug level so they are not lost entirely.

use tracing::debug;

use crate::{
    adapter::Adapter,
    env,
    error::{ErrorKind, Result},
    fs::{self, Dir, File, FileStat, LockMode},
};

/// One step of directory iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirEntry {
    pub found: bool,
    pub name: String,
}

fn ok_or_log<T>(op: &'static str, res: Result<T>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(op, error = %e, "collapsed to failure");
            None
        }
    }
}

fn succeeded(op: &'static str, res: Result<()>) -> bool {
    ok_or_log(op, res).is_some()
}

/// Open `path`; `None` on any failure.  `lock` requests an exclusive lock.
pub fn open(adapter: &Adapter, path: &str, mode: &str, lock: bool) -> Option<File> {
    let lock = if lock {
        LockMode::Exclusive
    } else {
        LockMode::None
    };
    ok_or_log("open", adapter.open(path, mode, lock))
}

/// Write the first `size` bytes of `buf` (all of it if `size` is larger).
/// Returns the byte count written, `0` on failure.  Console handles always
/// report the full clamped length, even when the console write failed.
pub fn write(buf: &[u8], size: usize, file: &mut File) -> usize {
    let buf = &buf[..size.min(buf.len())];
    if file.is_console() {
        let _ = ok_or_log("write", file.write_all(buf));
        return buf.len();
    }
    ok_or_log("write", file.write(buf)).unwrap_or(0)
}

/// Close the handle and clear the caller's reference.
pub fn close(file: &mut Option<File>, unlock: bool) {
    if let Some(f) = file.take() {
        let _ = ok_or_log("close", f.close(unlock));
    }
}

pub fn opendir(adapter: &Adapter, path: &str) -> Option<Dir> {
    ok_or_log("opendir", adapter.open_dir(path))
}

/// Next entry, or `{ found: false, name: "" }` at the end.
///
/// Entries whose names cannot be represented as UTF-8 are skipped so that
/// iteration still ends with exactly one terminal result.
pub fn readdir(dir: &mut Dir) -> DirEntry {
    loop {
        match dir.read_entry() {
            Ok(Some(name)) => return DirEntry { found: true, name },
            Ok(None) => return DirEntry::default(),
            Err(e) if e.kind() == ErrorKind::InvalidEncoding => {
                debug!(error = %e, "skipping entry");
            }
            Err(e) => {
                debug!(op = "readdir", error = %e, "collapsed to failure");
                return DirEntry::default();
            }
        }
    }
}

pub fn closedir(dir: &mut Option<Dir>) {
    if let Some(d) = dir.take() {
        d.close();
    }
}

/// Fill `buf` with the metadata of `path`.  `0` on success, `-1` on failure.
pub fn stat(path: &str, buf: &mut FileStat) -> i32 {
    match ok_or_log("stat", fs::stat(path)) {
        Some(st) => {
            *buf = st;
            0
        }
        None => -1,
    }
}

pub fn mkdir(path: &str, mode: u32) -> bool {
    succeeded("mkdir", fs::mkdir(path, mode))
}

pub fn rmdir(path: &str) -> bool {
    succeeded("rmdir", fs::rmdir(path))
}

pub fn rename(old: &str, new: &str) -> bool {
    succeeded("rename", fs::rename(old, new))
}

pub fn chmod(path: &str, mode: u32) -> bool {
    succeeded("chmod", fs::chmod(path, mode))
}

pub fn remove(path: &str) -> bool {
    succeeded("remove", fs::remove(path))
}

/// Store the value of `name` in `value` and return `true`, or return
/// `false` and leave `value` untouched.
pub fn get_env(name: &str, value: &mut String) -> bool {
    match ok_or_log("getenv", env::get_env(name)).flatten() {
        Some(v) => {
            *value = v;
            true
        }
        None => false,
    }
}

pub fn set_env(name: &str, value: &str) -> bool {
    succeeded("setenv", env::set_env(name, value))
}

pub fn is_dark_mode(adapter: &Adapter) -> bool {
    adapter.is_dark_mode()
}

/// `"dark"` or `"light"`.
pub fn get_default_theme(adapter: &Adapter) -> &'static str {
    adapter.default_theme().as_str()
}
