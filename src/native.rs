// ── Encoding boundary ─────────────────────────────────────────────────────────
//
// The only place where UTF-8 strings are turned into native OS strings and
// back.  The conversion itself is std's `OsStr`/`OsString` machinery (WTF-16
// on Windows, raw bytes on Unix); this module adds the checks that std would
// otherwise turn into panics or silent truncation.

use std::{ffi::OsString, path::Path};

use crate::error::{Error, Result};

/// Borrow a UTF-8 path as a native `Path`.
///
/// Interior NUL bytes are rejected: the native APIs take null-terminated
/// strings and would silently truncate at the first NUL.
pub(crate) fn path<'a>(op: &'static str, s: &'a str) -> Result<&'a Path> {
    if s.contains('\0') {
        return Err(Error::InvalidInput {
            op,
            reason: "path contains a NUL byte",
        });
    }
    Ok(Path::new(s))
}

/// Convert a native string returned by the OS back to UTF-8.
pub(crate) fn to_utf8(op: &'static str, what: &'static str, s: OsString) -> Result<String> {
    s.into_string().map_err(|raw| Error::InvalidEncoding {
        op,
        what,
        lossy: raw.to_string_lossy().into_owned(),
    })
}

/// Encode `s` as a null-terminated UTF-16 buffer for `PCWSTR` arguments.
#[cfg(windows)]
pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn nul_in_path_is_rejected() {
        let err = path("open", "a\0b").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn non_ascii_path_is_borrowed_unchanged() {
        let p = path("open", "données/日本語.txt").expect("valid path");
        assert_eq!(p.to_str(), Some("données/日本語.txt"));
    }

    #[test]
    fn utf8_native_string_converts() {
        let s = to_utf8("readdir", "entry name", OsString::from("ünïcödé")).expect("utf8");
        assert_eq!(s, "ünïcödé");
    }

    #[cfg(unix)]
    #[test]
    fn invalid_native_bytes_report_encoding_error() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![b'a', 0xFF, b'b']);
        let err = to_utf8("readdir", "entry name", raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    }

    #[cfg(windows)]
    #[test]
    fn wide_is_null_terminated() {
        let w = wide("é");
        assert_eq!(w, vec![0x00E9, 0]);
    }
}
