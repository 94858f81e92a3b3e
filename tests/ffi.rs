//! Drives the exported C surface the way a foreign caller would.
//!
//! Window-creating tests run only where the shell is backed by the headless
//! window; on Windows they would open a real window and block in the loop.

#![allow(unsafe_code)]
#![cfg_attr(windows, allow(dead_code, unused_imports))]

use std::{
    cell::RefCell,
    ffi::{c_char, CStr, CString},
    ptr,
};

use casement::{ffi::*, platform::WindowBackend};

thread_local! {
    static RECEIVED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

extern "C" fn record_event(json: *const c_char) {
    // SAFETY: the shell passes a live NUL-terminated string for the call.
    let json = unsafe { CStr::from_ptr(json) }.to_string_lossy().into_owned();
    RECEIVED.with(|r| r.borrow_mut().push(json));
}

fn take_events() -> Vec<serde_json::Value> {
    RECEIVED.with(|r| {
        r.borrow_mut()
            .drain(..)
            .map(|json| serde_json::from_str(&json).unwrap())
            .collect()
    })
}

fn new_shell(title: &str, hide_on_close: bool) -> *mut CasementShell {
    let title = CString::new(title).unwrap();
    unsafe {
        casement_new(
            title.as_ptr(),
            800,
            600,
            1,
            0,
            0,
            0,
            3,
            i32::from(hide_on_close),
        )
    }
}

#[test]
fn null_shell_is_ignored_everywhere() {
    let s = CString::new("x").unwrap();
    unsafe {
        casement_free(ptr::null_mut());
        assert_eq!(casement_run(ptr::null_mut()), 1);
        casement_destroy(ptr::null_mut());
        casement_quit(ptr::null_mut());
        casement_set_min_window_size(ptr::null_mut(), 100, 100);
        casement_set_title(ptr::null_mut(), s.as_ptr());
        casement_toggle_maximise(ptr::null_mut());
        casement_toggle_fullscreen(ptr::null_mut());
        assert_eq!(casement_is_maximised(ptr::null_mut()), 0);
        assert_eq!(casement_is_minimised(ptr::null_mut()), 0);
        casement_exec_js(ptr::null_mut(), s.as_ptr());
    }
}

#[test]
fn settings_apply_before_the_window_exists() {
    let shell = new_shell("Settings", false);
    let title = CString::new("Renamed").unwrap();
    unsafe {
        casement_set_min_window_size(shell, 400, 300);
        casement_set_max_window_size(shell, 1600, 1200);
        casement_disable_frame(shell);
        casement_set_title(shell, title.as_ptr());
        casement_set_colour(shell, 300, -5, 128, 255);
        // Null string arguments read as empty.
        casement_set_bindings(shell, ptr::null());

        let s = &*shell;
        let c = s.constraints();
        assert_eq!((c.min_width, c.min_height), (400, 300));
        assert_eq!((c.max_width, c.max_height), (1600, 1200));
        assert!(!s.has_frame());
        assert_eq!(s.title(), "Renamed");
        let colour = s.background();
        assert_eq!((colour.r, colour.g, colour.b), (255, 0, 128));

        // Not created yet: queries answer false, toggles change nothing.
        assert_eq!(casement_is_maximised(shell), 0);
        casement_toggle_maximise(shell);
        assert_eq!(casement_is_maximised(shell), 0);

        casement_free(shell);
    }
}

#[cfg(not(windows))]
#[test]
fn run_toggle_and_close() {
    let shell = new_shell("Lifecycle", false);
    unsafe {
        casement_set_event_callback(shell, Some(record_event));
        assert_eq!(casement_run(shell), 0);

        casement_toggle_maximise(shell);
        assert_eq!(casement_is_maximised(shell), 1);
        casement_toggle_maximise(shell);
        assert_eq!(casement_is_maximised(shell), 0);

        casement_toggle_minimise(shell);
        assert_eq!(casement_is_minimised(shell), 1);
        casement_toggle_minimise(shell);
        assert_eq!(casement_is_minimised(shell), 0);

        casement_toggle_fullscreen(shell);
        assert!((*shell).is_fullscreen());
        casement_toggle_fullscreen(shell);
        assert!(!(*shell).is_fullscreen());

        casement_quit(shell);
        casement_free(shell);
    }

    let events = take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "closed");
    assert_eq!(events[0]["hidden"], false);
}

#[cfg(not(windows))]
#[test]
fn dark_mode_reply_carries_the_callback_id() {
    let shell = new_shell("Theme", false);
    let id = CString::new("cb-7").unwrap();
    unsafe {
        casement_set_event_callback(shell, Some(record_event));
        assert_eq!(casement_run(shell), 0);
        casement_dark_mode_enabled(shell, id.as_ptr());

        // Removing the callback stops delivery.
        casement_set_event_callback(shell, None);
        casement_dark_mode_enabled(shell, id.as_ptr());
        casement_free(shell);
    }

    let events = take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "darkModeResult");
    assert_eq!(events[0]["callbackId"], "cb-7");
    assert_eq!(events[0]["enabled"], false);
}

#[cfg(not(windows))]
#[test]
fn hide_on_close_keeps_the_window() {
    let shell = new_shell("Tray app", true);
    unsafe {
        casement_set_event_callback(shell, Some(record_event));
        assert_eq!(casement_run(shell), 0);
        casement_quit(shell);

        assert!((*shell).backend().is_created());
        assert!(!(*shell).backend().is_visible());
        casement_free(shell);
    }

    let events = take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["hidden"], true);
}
