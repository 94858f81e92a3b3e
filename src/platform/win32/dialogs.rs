// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// Thin wrappers around the Win32 common-dialog and message-box APIs.  The
// request types and translation rules live in `crate::dialogs`; this file
// only moves buffers in and out of the OS.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use tracing::{debug, warn};
use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::HWND,
        UI::{
            Controls::Dialogs::{
                CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW, OFN_ALLOWMULTISELECT,
                OFN_EXPLORER, OFN_FILEMUSTEXIST, OFN_FORCESHOWHIDDEN, OFN_HIDEREADONLY,
                OFN_NOCHANGEDIR, OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST, OPENFILENAMEW,
                OPEN_FILENAME_FLAGS,
            },
            WindowsAndMessaging::{
                MessageBoxW, IDCANCEL, IDNO, IDOK, IDYES, MB_DEFBUTTON1, MB_DEFBUTTON2,
                MB_DEFBUTTON3, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONQUESTION, MB_ICONWARNING,
                MB_OK, MB_OKCANCEL, MB_YESNO, MB_YESNOCANCEL, MESSAGEBOX_STYLE,
            },
        },
    },
};

use crate::dialogs::{
    filter_string, split_multi_select, ButtonSet, DialogButton, MessageDialogRequest,
    MessageKind, OpenDialogRequest, SaveDialogRequest,
};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths (and for a
/// multi-select list); use 32 768, the documented maximum for `\\?\` paths.
const PATH_BUF_LEN: usize = 32_768;

/// Null-terminated UTF-16 copy of `s`, or `None` for an empty string so the
/// dialog falls back to its own default.
fn wide_opt(s: &str) -> Option<Vec<u16>> {
    (!s.is_empty()).then(|| s.encode_utf16().chain(std::iter::once(0)).collect())
}

fn pcwstr(buf: &Option<Vec<u16>>) -> PCWSTR {
    buf.as_ref().map_or(PCWSTR::null(), |b| PCWSTR(b.as_ptr()))
}

/// File-name buffer pre-populated with `default_name`.
fn file_buffer(default_name: &str) -> Vec<u16> {
    default_name
        .encode_utf16()
        .take(PATH_BUF_LEN - 1)
        .chain(std::iter::repeat(0))
        .take(PATH_BUF_LEN)
        .collect()
}

// ── Open dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Open File" dialog.
///
/// Returns the chosen paths; empty if the user cancelled.  Folder picking
/// needs the COM item dialog and is not offered here.
pub(crate) fn show_open_dialog(owner: HWND, request: &OpenDialogRequest) -> Vec<PathBuf> {
    if request.allow_dirs && !request.allow_files {
        warn!("open dialog: directory selection is not supported");
        return Vec::new();
    }

    let mut buf = file_buffer(&request.default_filename);
    let filter = filter_string(&request.filters);
    let title = wide_opt(&request.title);
    let initial_dir = wide_opt(&request.default_dir);

    let mut flags: OPEN_FILENAME_FLAGS =
        OFN_EXPLORER | OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY | OFN_NOCHANGEDIR;
    if request.allow_multiple {
        flags = flags | OFN_ALLOWMULTISELECT;
    }
    if request.show_hidden_files {
        flags = flags | OFN_FORCESHOWHIDDEN;
    }

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        lpstrTitle: pcwstr(&title),
        lpstrInitialDir: pcwstr(&initial_dir),
        Flags: flags,
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised; `buf`, `filter`, `title` and
    // `initial_dir` outlive this call.  GetOpenFileNameW reads and writes only
    // within the buffers we provided.  Called on the UI thread (required for
    // modal dialogs).
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };

    if ok.as_bool() {
        split_multi_select(&buf).into_iter().map(PathBuf::from).collect()
    } else {
        log_dialog_failure("GetOpenFileNameW");
        Vec::new()
    }
}

// ── Save dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Save As" dialog.
///
/// Returns the chosen path, or `None` if cancelled.
pub(crate) fn show_save_dialog(owner: HWND, request: &SaveDialogRequest) -> Option<PathBuf> {
    let mut buf = file_buffer(&request.default_filename);
    let filter = filter_string(&request.filters);
    let title = wide_opt(&request.title);
    let initial_dir = wide_opt(&request.default_dir);

    let mut flags = OFN_EXPLORER | OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST | OFN_NOCHANGEDIR;
    if request.show_hidden_files {
        flags = flags | OFN_FORCESHOWHIDDEN;
    }

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        lpstrTitle: pcwstr(&title),
        lpstrInitialDir: pcwstr(&initial_dir),
        Flags: flags,
        ..Default::default()
    };

    // SAFETY: same invariants as show_open_dialog above.
    let ok = unsafe { GetSaveFileNameW(&mut ofn) };

    if ok.as_bool() {
        Some(path_from_buf(&buf))
    } else {
        log_dialog_failure("GetSaveFileNameW");
        None
    }
}

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`.
fn path_from_buf(buf: &[u16]) -> PathBuf {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    PathBuf::from(String::from_utf16_lossy(&buf[..len]))
}

/// Distinguish a cancel (extended error 0) from a real failure.
fn log_dialog_failure(function: &'static str) {
    // SAFETY: CommDlgExtendedError reads thread-local dialog state; no inputs.
    let code = unsafe { CommDlgExtendedError() };
    if code.0 == 0 {
        debug!(function, "dialog cancelled");
    } else {
        warn!(function, code = code.0, "common dialog failed");
    }
}

// ── Message box ───────────────────────────────────────────────────────────────

fn message_style(request: &MessageDialogRequest) -> MESSAGEBOX_STYLE {
    let buttons = match request.button_set() {
        ButtonSet::Ok => MB_OK,
        ButtonSet::OkCancel => MB_OKCANCEL,
        ButtonSet::YesNo => MB_YESNO,
        ButtonSet::YesNoCancel => MB_YESNOCANCEL,
    };
    let icon = match request.kind {
        MessageKind::Info => MB_ICONINFORMATION,
        MessageKind::Warning => MB_ICONWARNING,
        MessageKind::Error => MB_ICONERROR,
        MessageKind::Question => MB_ICONQUESTION,
    };
    let default = match request.default_index() {
        Some(1) => MB_DEFBUTTON2,
        Some(2) => MB_DEFBUTTON3,
        _ => MB_DEFBUTTON1,
    };
    buttons | icon | default
}

/// Show a modal message box owned by `owner` and report the pressed button.
pub(crate) fn show_message_box(owner: HWND, request: &MessageDialogRequest) -> Option<DialogButton> {
    let text: Vec<u16> = request.message.encode_utf16().chain(std::iter::once(0)).collect();
    let caption: Vec<u16> = request.title.encode_utf16().chain(std::iter::once(0)).collect();

    // SAFETY: text and caption are valid null-terminated UTF-16 strings that
    // remain allocated for the duration of the MessageBoxW call.  owner is
    // either the live main window or null (no owner).
    let pressed = unsafe {
        MessageBoxW(
            owner,
            PCWSTR(text.as_ptr()),
            PCWSTR(caption.as_ptr()),
            message_style(request),
        )
    };

    match pressed {
        IDOK => Some(DialogButton::Ok),
        IDCANCEL => Some(DialogButton::Cancel),
        IDYES => Some(DialogButton::Yes),
        IDNO => Some(DialogButton::No),
        other => {
            warn!(code = other.0, "MessageBoxW failed or returned an unexpected button");
            None
        }
    }
}
