// ── UTF-8 console writer ──────────────────────────────────────────────────────
//
// Writes aimed at the process's standard output and standard error go through
// a `Console` rather than a raw file handle.  The console is a process-scoped
// resource: it is initialized once (switching the Windows console to the
// UTF-8 code page) and then shared by every stdout/stderr `File`.

use std::{
    io::{self, Write},
    sync::{Arc, OnceLock},
};

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// One of the two process output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Stdout,
    Stderr,
}

impl StdStream {
    fn name(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

/// Process-wide UTF-8 console writer.
#[derive(Debug)]
pub struct Console {
    /// `true` when the console output code page is known to be UTF-8.
    utf8: bool,
}

static GLOBAL: OnceLock<Arc<Console>> = OnceLock::new();

impl Console {
    /// Initialize the process console, or return the existing one.
    ///
    /// Only the first call configures the console; `utf8_code_page` is
    /// ignored on later calls.
    pub fn init(utf8_code_page: bool) -> Arc<Console> {
        GLOBAL
            .get_or_init(|| Arc::new(Console::configure(utf8_code_page)))
            .clone()
    }

    /// The process console, initialized with defaults if nobody did so yet.
    pub fn global() -> Arc<Console> {
        Self::init(true)
    }

    fn configure(utf8_code_page: bool) -> Console {
        if !utf8_code_page {
            return Console { utf8: false };
        }

        #[cfg(windows)]
        let utf8 = match crate::platform::win32::console::enable_utf8_output() {
            Ok(changed) => {
                debug!(changed, "console output code page set to UTF-8");
                true
            }
            Err(e) => {
                // No console attached (e.g. output redirected to a pipe).
                debug!(error = %e, "could not switch console to UTF-8");
                false
            }
        };

        // Unix terminals take the bytes as-is; the locale decides rendering.
        #[cfg(not(windows))]
        let utf8 = {
            debug!("console passes UTF-8 through unchanged");
            true
        };

        Console { utf8 }
    }

    /// Whether output is known to render as UTF-8.
    pub fn is_utf8(&self) -> bool {
        self.utf8
    }

    /// Write all of `buf` to `stream` and flush immediately.
    ///
    /// The stream is locked for the duration of the write so that output
    /// from concurrent callers is not interleaved mid-buffer.
    pub fn write(&self, stream: StdStream, buf: &[u8]) -> Result<()> {
        trace!(stream = stream.name(), len = buf.len(), "console write");
        let res = match stream {
            StdStream::Stdout => write_flush(&mut io::stdout().lock(), buf),
            StdStream::Stderr => write_flush(&mut io::stderr().lock(), buf),
        };
        res.map_err(|e| Error::io("write", stream.name(), e))
    }

    /// Convenience wrapper around [`Console::write`] for text.
    pub fn write_str(&self, stream: StdStream, s: &str) -> Result<()> {
        self.write(stream, s.as_bytes())
    }
}

fn write_flush(out: &mut impl Write, buf: &[u8]) -> io::Result<()> {
    out.write_all(buf)?;
    out.flush()
}
