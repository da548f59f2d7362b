use std::ffi::c_void;

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::ERROR_SUCCESS,
        System::Registry::{RegGetValueW, HKEY_CURRENT_USER, RRF_RT_REG_DWORD},
    },
};

use crate::{
    error::{Error, Result},
    native,
};

/// Read a `REG_DWORD` value under `HKEY_CURRENT_USER`.
///
/// Opens `subkey`, reads `value` and closes the key in one call.  A missing
/// key, a missing value, or a value of a different type are all errors.
pub(crate) fn read_hkcu_dword(subkey: &str, value: &str) -> Result<u32> {
    let subkey_wide = native::wide(subkey);
    let value_wide = native::wide(value);
    let mut data: u32 = 0;
    let mut size = std::mem::size_of::<u32>() as u32;

    // SAFETY: subkey_wide and value_wide are null-terminated UTF-16 buffers
    // that outlive the call.  `data` is a DWORD-sized buffer and `size`
    // reports exactly that; RRF_RT_REG_DWORD restricts the write to 4 bytes.
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            PCWSTR(subkey_wide.as_ptr()),
            PCWSTR(value_wide.as_ptr()),
            RRF_RT_REG_DWORD,
            None,
            Some(&mut data as *mut u32 as *mut c_void),
            Some(&mut size),
        )
    };

    if status != ERROR_SUCCESS {
        return Err(Error::Win32 {
            function: "RegGetValueW",
            code: status.0,
        });
    }
    Ok(data)
}
