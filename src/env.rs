// ── Environment variables ─────────────────────────────────────────────────────
//
// UTF-8 access to the process environment block.  Names and values are
// validated up front: std panics on malformed names, and the native APIs take
// null-terminated strings.

use std::ffi::OsString;

use crate::{
    error::{Error, Result},
    native,
};

fn check_name(op: &'static str, name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "variable name is empty"
    } else if name.contains('=') {
        "variable name contains '='"
    } else if name.contains('\0') {
        "variable name contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(Error::InvalidInput { op, reason })
}

/// Read `name`.  `Ok(None)` when the variable is unset.
pub fn get_env(name: &str) -> Result<Option<String>> {
    check_name("getenv", name)?;
    match std::env::var_os(name) {
        None => Ok(None),
        Some(v) => native::to_utf8("getenv", "variable value", v).map(Some),
    }
}

/// Set `name` to `value`, overwriting any previous value.
pub fn set_env(name: &str, value: &str) -> Result<()> {
    check_name("setenv", name)?;
    if value.contains('\0') {
        return Err(Error::InvalidInput {
            op: "setenv",
            reason: "variable value contains a NUL byte",
        });
    }
    std::env::set_var(name, OsString::from(value));
    Ok(())
}
