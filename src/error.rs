// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in utf8sys return `error::Result<T>`.  Callers that
// need the legacy "true/false" contract go through `compat`, which is the only
// place where errors are collapsed.

use std::io;

use thiserror::Error;

/// Coarse classification of an [`Error`], for retry/report decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    /// An argument was rejected before reaching the OS (bad mode string,
    /// interior NUL, malformed variable name).
    InvalidInput,
    /// A native string could not be represented as UTF-8.
    InvalidEncoding,
    /// An advisory lock is held by another handle.
    WouldBlock,
    /// The operation is not available on this handle or platform.
    Unsupported,
    /// Any other I/O failure.
    Io,
    /// A Win32 API returned a failure code that has no I/O equivalent.
    Win32,
}

/// Every error that utf8sys can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// A native call failed.
    #[error("{op} {path:?} failed: {source}")]
    Io {
        /// The operation that failed, e.g. `"open"`.
        op: &'static str,
        /// The UTF-8 path or name the operation was applied to.
        path: String,
        #[source]
        source: io::Error,
    },

    /// An argument was rejected before the native call.
    #[error("{op}: {reason}")]
    InvalidInput {
        op: &'static str,
        reason: &'static str,
    },

    /// A native result could not be converted to UTF-8.
    #[error("{op}: {what} is not valid UTF-8: {lossy:?}")]
    InvalidEncoding {
        op: &'static str,
        what: &'static str,
        /// Lossy rendering of the offending value, for display only.
        lossy: String,
    },

    /// The operation is not available on this handle or platform.
    #[error("{op} is not supported here")]
    Unsupported { op: &'static str },

    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code or HRESULT.
        code: u32,
    },
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => ErrorKind::NotFound,
                io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
                io::ErrorKind::WouldBlock => ErrorKind::WouldBlock,
                io::ErrorKind::InvalidInput => ErrorKind::InvalidInput,
                io::ErrorKind::Unsupported => ErrorKind::Unsupported,
                _ => ErrorKind::Io,
            },
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Win32 { .. } => ErrorKind::Win32,
        }
    }
}

// Convert a windows-crate error (HRESULT) directly into an Error so that `?`
// can be used on `windows::core::Result<T>` inside the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for Error {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_are_classified() {
        let cases = [
            (io::ErrorKind::NotFound, ErrorKind::NotFound),
            (io::ErrorKind::PermissionDenied, ErrorKind::PermissionDenied),
            (io::ErrorKind::AlreadyExists, ErrorKind::AlreadyExists),
            (io::ErrorKind::WouldBlock, ErrorKind::WouldBlock),
            (io::ErrorKind::UnexpectedEof, ErrorKind::Io),
        ];
        for (io_kind, expected) in cases {
            let e = Error::io("open", "x", io::Error::from(io_kind));
            assert_eq!(e.kind(), expected, "{io_kind:?}");
        }
    }

    #[test]
    fn display_names_operation_and_path() {
        let e = Error::io("rename", "é.txt", io::Error::from(io::ErrorKind::NotFound));
        let s = e.to_string();
        assert!(s.starts_with("rename \"é.txt\" failed"), "{s}");
    }

    #[test]
    fn win32_display_is_hex() {
        let e = Error::Win32 {
            function: "RegGetValueW",
            code: 2,
        };
        assert_eq!(e.to_string(), "RegGetValueW failed (error 0x00000002)");
        assert_eq!(e.kind(), ErrorKind::Win32);
    }
}
