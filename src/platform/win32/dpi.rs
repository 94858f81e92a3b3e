#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::HWND,
    UI::HiDpi::{GetDpiForWindow, SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2},
};

use crate::geometry::{DpiScale, BASE_DPI};

/// Opt into Per-Monitor v2 DPI awareness.
/// MUST be called before any window is created on the calling thread.
pub(crate) fn init() {
    // SAFETY: Must precede all window creation.  A second call fails with
    // ERROR_ACCESS_DENIED, which is harmless and ignored.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Return the DPI for `hwnd`. Falls back to BASE_DPI (96) on failure.
pub(crate) fn get_for_window(hwnd: HWND) -> u32 {
    // SAFETY: hwnd is a valid window handle provided by the caller.
    let v = unsafe { GetDpiForWindow(hwnd) };
    if v == 0 {
        BASE_DPI
    } else {
        v
    }
}

/// Logical-to-device scale for the monitor hosting `hwnd`.
pub(crate) fn scale_for_window(hwnd: HWND) -> DpiScale {
    DpiScale::uniform(get_for_window(hwnd))
}
