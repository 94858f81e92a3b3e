#![allow(unsafe_code)]

use windows::{
    core::w,
    Win32::{
        Foundation::ERROR_SUCCESS,
        System::Registry::{RegGetValueW, HKEY_CURRENT_USER, RRF_RT_REG_DWORD},
    },
};

/// `true` when Windows is set to use dark application themes.
///
/// Reads `AppsUseLightTheme` under the user's Personalize key; a missing key
/// (pre-1809 systems) means light.
pub(crate) fn apps_use_dark_theme() -> bool {
    let mut value: u32 = 1;
    let mut size = std::mem::size_of::<u32>() as u32;

    // SAFETY: value and size are valid for writes for the duration of the
    // call; size holds the byte length of value.  Both strings are static
    // null-terminated UTF-16 literals.
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize"),
            w!("AppsUseLightTheme"),
            RRF_RT_REG_DWORD,
            None,
            Some(std::ptr::addr_of_mut!(value).cast()),
            Some(&mut size),
        )
    };

    status == ERROR_SUCCESS && value == 0
}
