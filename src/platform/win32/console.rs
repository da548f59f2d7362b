use windows::Win32::{
    Globalization::CP_UTF8,
    System::Console::{GetConsoleOutputCP, SetConsoleOutputCP},
};

use crate::error::Result;

/// Switch the console output code page to UTF-8.
///
/// Returns `Ok(false)` when it already was.  Fails when the process has no
/// console attached.
pub(crate) fn enable_utf8_output() -> Result<bool> {
    // SAFETY: GetConsoleOutputCP takes no parameters and has no
    // preconditions; it returns 0 when no console is attached.
    let current = unsafe { GetConsoleOutputCP() };
    if current == CP_UTF8 {
        return Ok(false);
    }

    // SAFETY: SetConsoleOutputCP only changes process-wide console state;
    // CP_UTF8 is a valid, always-installed code page.
    unsafe { SetConsoleOutputCP(CP_UTF8) }?;
    Ok(true)
}
