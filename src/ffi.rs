// ── C surface ─────────────────────────────────────────────────────────────────
//
// Flat `extern "C"` functions over `Shell`, for an application layer written
// in another language.  The shell is handed out as an opaque pointer from
// `casement_new` and must be released with `casement_free` on the thread that
// created it.
//
// Conventions:
//   • Every function tolerates a null shell pointer (it does nothing).
//   • Strings are NUL-terminated UTF-8; null reads as "", invalid UTF-8 is
//     replaced lossily.
//   • Booleans are C ints, non-zero meaning true.
//   • Nothing panics across the boundary; errors are logged.

#![allow(unsafe_code)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::too_many_arguments)]

use std::ffi::{c_char, c_int, CStr, CString};

use tracing::{error, warn};

use crate::{
    config::{LogLevel, ShellConfig},
    dialogs::{MessageDialogRequest, MessageKind, OpenDialogRequest, SaveDialogRequest},
    platform::NativeBackend,
    shell::Shell,
};

/// The opaque handle the C side holds.
pub type CasementShell = Shell<NativeBackend>;

/// Receives each event as a JSON document.  The string is only valid for the
/// duration of the call.
pub type CasementEventCallback = extern "C" fn(event_json: *const c_char);

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Copy a C string argument.
///
/// # Safety
/// `ptr` is null or points at a NUL-terminated string valid for reads.
unsafe fn string_arg(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Like `string_arg`, but an empty string becomes `None`.
unsafe fn optional_arg(ptr: *const c_char) -> Option<String> {
    // SAFETY: forwarded contract.
    let s = unsafe { string_arg(ptr) };
    (!s.is_empty()).then_some(s)
}

fn flag(v: c_int) -> bool {
    v != 0
}

/// Run `f` against the shell behind `app`, or return `default` for null.
///
/// # Safety
/// `app` is null or a pointer from `casement_new` not yet freed, used only
/// from the thread that created it.
unsafe fn with_shell<T>(app: *mut CasementShell, default: T, f: impl FnOnce(&mut CasementShell) -> T) -> T {
    // SAFETY: per the caller's contract the pointer is either null or a live,
    // exclusively-used Box allocation.
    match unsafe { app.as_mut() } {
        Some(shell) => f(shell),
        None => default,
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[no_mangle]
pub unsafe extern "C" fn casement_new(
    title: *const c_char,
    width: c_int,
    height: c_int,
    resizable: c_int,
    devtools: c_int,
    fullscreen: c_int,
    start_hidden: c_int,
    log_level: c_int,
    hide_window_on_close: c_int,
) -> *mut CasementShell {
    let config = ShellConfig {
        // SAFETY: forwarded contract.
        title: unsafe { string_arg(title) },
        width,
        height,
        resizable: flag(resizable),
        devtools: flag(devtools),
        fullscreen: flag(fullscreen),
        start_hidden: flag(start_hidden),
        log_level: LogLevel::from_raw(log_level),
        hide_window_on_close: flag(hide_window_on_close),
    };
    let shell = Shell::new(config);
    shell.init_logging();
    Box::into_raw(Box::new(shell))
}

/// Release a shell (and its window, if still open).  Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn casement_free(app: *mut CasementShell) {
    if app.is_null() {
        return;
    }
    // SAFETY: app came from Box::into_raw in casement_new and is freed once.
    drop(unsafe { Box::from_raw(app) });
}

/// Returns 0 after a clean shutdown, 1 if the window could not be created or
/// the message loop failed.
#[no_mangle]
pub unsafe extern "C" fn casement_run(app: *mut CasementShell) -> c_int {
    // SAFETY: forwarded contract.
    unsafe {
        with_shell(app, 1, |shell| match shell.run() {
            Ok(()) => 0,
            Err(e) => {
                error!(error = %e, "shell run failed");
                1
            }
        })
    }
}

#[no_mangle]
pub unsafe extern "C" fn casement_destroy(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::destroy) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_quit(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::quit) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_event_callback(
    app: *mut CasementShell,
    callback: Option<CasementEventCallback>,
) {
    unsafe {
        with_shell(app, (), |shell| match callback {
            Some(callback) => shell.set_event_sink(Box::new(move |event| {
                let json = match event.to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(error = %e, "event serialisation failed");
                        return;
                    }
                };
                match CString::new(json) {
                    Ok(json) => callback(json.as_ptr()),
                    Err(_) => warn!("event contains an interior NUL; dropped"),
                }
            })),
            None => shell.clear_event_sink(),
        })
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[no_mangle]
pub unsafe extern "C" fn casement_set_debug(app: *mut CasementShell, on: c_int) {
    unsafe { with_shell(app, (), |s| s.set_debug(flag(on))) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_min_window_size(app: *mut CasementShell, width: c_int, height: c_int) {
    unsafe { with_shell(app, (), |s| s.set_min_size(width, height)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_max_window_size(app: *mut CasementShell, width: c_int, height: c_int) {
    unsafe { with_shell(app, (), |s| s.set_max_size(width, height)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_disable_frame(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::disable_frame) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_title(app: *mut CasementShell, title: *const c_char) {
    let title = unsafe { string_arg(title) };
    unsafe { with_shell(app, (), |s| s.set_title(&title)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_colour(
    app: *mut CasementShell,
    red: c_int,
    green: c_int,
    blue: c_int,
    alpha: c_int,
) {
    unsafe { with_shell(app, (), |s| s.set_colour(red, green, blue, alpha)) }
}

// ── Visibility & placement ────────────────────────────────────────────────────

#[no_mangle]
pub unsafe extern "C" fn casement_show(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::show) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_hide(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::hide) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_center(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::center) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_is_maximised(app: *mut CasementShell) -> c_int {
    unsafe { with_shell(app, 0, |s| c_int::from(s.is_maximised())) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_maximise(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::maximise) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_unmaximise(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::unmaximise) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_toggle_maximise(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::toggle_maximise) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_is_minimised(app: *mut CasementShell) -> c_int {
    unsafe { with_shell(app, 0, |s| c_int::from(s.is_minimised())) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_minimise(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::minimise) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_unminimise(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::unminimise) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_toggle_minimise(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::toggle_minimise) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_size(app: *mut CasementShell, width: c_int, height: c_int) {
    unsafe { with_shell(app, (), |s| s.set_size(width, height)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_set_position(app: *mut CasementShell, x: c_int, y: c_int) {
    unsafe { with_shell(app, (), |s| s.set_position(x, y)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_fullscreen(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::fullscreen) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_unfullscreen(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::unfullscreen) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_toggle_fullscreen(app: *mut CasementShell) {
    unsafe { with_shell(app, (), Shell::toggle_fullscreen) }
}

// ── Dialogs ───────────────────────────────────────────────────────────────────

#[no_mangle]
pub unsafe extern "C" fn casement_open_dialog(
    app: *mut CasementShell,
    callback_id: *const c_char,
    title: *const c_char,
    filters: *const c_char,
    default_filename: *const c_char,
    default_dir: *const c_char,
    allow_files: c_int,
    allow_dirs: c_int,
    allow_multiple: c_int,
    show_hidden_files: c_int,
    can_create_directories: c_int,
    resolves_aliases: c_int,
    treat_packages_as_directories: c_int,
) {
    // SAFETY: every string argument follows the module's string contract.
    let (callback_id, request) = unsafe {
        (
            string_arg(callback_id),
            OpenDialogRequest {
                title: string_arg(title),
                filters: string_arg(filters),
                default_filename: string_arg(default_filename),
                default_dir: string_arg(default_dir),
                allow_files: flag(allow_files),
                allow_dirs: flag(allow_dirs),
                allow_multiple: flag(allow_multiple),
                show_hidden_files: flag(show_hidden_files),
                can_create_directories: flag(can_create_directories),
                resolves_aliases: flag(resolves_aliases),
                treat_packages_as_directories: flag(treat_packages_as_directories),
            },
        )
    };
    unsafe { with_shell(app, (), |s| s.open_dialog(&callback_id, &request)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_save_dialog(
    app: *mut CasementShell,
    callback_id: *const c_char,
    title: *const c_char,
    filters: *const c_char,
    default_filename: *const c_char,
    default_dir: *const c_char,
    show_hidden_files: c_int,
    can_create_directories: c_int,
    treat_packages_as_directories: c_int,
) {
    // SAFETY: every string argument follows the module's string contract.
    let (callback_id, request) = unsafe {
        (
            string_arg(callback_id),
            SaveDialogRequest {
                title: string_arg(title),
                filters: string_arg(filters),
                default_filename: string_arg(default_filename),
                default_dir: string_arg(default_dir),
                show_hidden_files: flag(show_hidden_files),
                can_create_directories: flag(can_create_directories),
                treat_packages_as_directories: flag(treat_packages_as_directories),
            },
        )
    };
    unsafe { with_shell(app, (), |s| s.save_dialog(&callback_id, &request)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_message_dialog(
    app: *mut CasementShell,
    callback_id: *const c_char,
    kind: *const c_char,
    title: *const c_char,
    message: *const c_char,
    icon: *const c_char,
    button1: *const c_char,
    button2: *const c_char,
    button3: *const c_char,
    button4: *const c_char,
    default_button: *const c_char,
    cancel_button: *const c_char,
) {
    // SAFETY: every string argument follows the module's string contract.
    let (callback_id, request) = unsafe {
        let request = MessageDialogRequest {
            kind: MessageKind::from_name(&string_arg(kind)),
            title: string_arg(title),
            message: string_arg(message),
            icon: string_arg(icon),
            buttons: Vec::new(),
            default_button: optional_arg(default_button),
            cancel_button: optional_arg(cancel_button),
        }
        .with_buttons([
            string_arg(button1),
            string_arg(button2),
            string_arg(button3),
            string_arg(button4),
        ]);
        (string_arg(callback_id), request)
    };
    unsafe { with_shell(app, (), |s| s.message_dialog(&callback_id, &request)) }
}

#[no_mangle]
pub unsafe extern "C" fn casement_dark_mode_enabled(app: *mut CasementShell, callback_id: *const c_char) {
    let callback_id = unsafe { string_arg(callback_id) };
    unsafe { with_shell(app, (), |s| s.dark_mode_enabled(&callback_id)) }
}

// ── Extension points ──────────────────────────────────────────────────────────

macro_rules! string_op {
    ($name:ident => $method:ident) => {
        #[no_mangle]
        pub unsafe extern "C" fn $name(app: *mut CasementShell, arg: *const c_char) {
            // SAFETY: string contract of this module.
            let arg = unsafe { string_arg(arg) };
            unsafe { with_shell(app, (), |s| s.$method(&arg)) }
        }
    };
}

string_op!(casement_set_bindings => set_bindings);
string_op!(casement_exec_js => exec_js);
string_op!(casement_set_application_menu => set_application_menu);
string_op!(casement_add_tray_menu => add_tray_menu);
string_op!(casement_set_tray_menu => set_tray_menu);
string_op!(casement_delete_tray_menu_by_id => delete_tray_menu_by_id);
string_op!(casement_update_tray_menu_label => update_tray_menu_label);
string_op!(casement_add_context_menu => add_context_menu);
string_op!(casement_update_context_menu => update_context_menu);
