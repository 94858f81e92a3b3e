// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the window class and create the top-level window.
//   • Attach per-window state through GWLP_USERDATA.
//   • Run the Win32 message loop.
//   • Handle WM_GETMINMAXINFO (size bounds), WM_ERASEBKGND (background
//     colour), WM_CLOSE (hide-on-close) and WM_DESTROY (quit).
//   • Implement `WindowBackend` for the shell on top of the above.
//   • Expose a safe error-dialog helper for use by main().

#![allow(unsafe_code)]

use std::{cell::Cell, path::PathBuf};

use tracing::{debug, info, trace, warn};
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{
            GetLastError, COLORREF, ERROR_CLASS_ALREADY_EXISTS, HINSTANCE, HWND, LPARAM, LRESULT,
            POINT, RECT, WPARAM,
        },
        Graphics::Gdi::{
            CreateSolidBrush, DeleteObject, FillRect, GetMonitorInfoW, InvalidateRect,
            MonitorFromWindow, UpdateWindow, HBRUSH, HDC, HGDIOBJ, MONITORINFO, MONITOR_DEFAULTTONEAREST,
        },
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Input::KeyboardAndMouse::SetFocus,
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
                GetMessageW, GetWindowLongPtrW, GetWindowLongW, GetWindowPlacement,
                GetWindowRect, LoadCursorW, MessageBoxW, PostMessageW, PostQuitMessage,
                RegisterClassExW, SetWindowLongPtrW, SetWindowLongW, SetWindowPlacement,
                SetWindowPos, SetWindowTextW, ShowWindow, TranslateMessage, CS_HREDRAW,
                CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA, GWL_STYLE, HWND_TOP, IDC_ARROW,
                MB_ICONERROR, MB_OK, MINMAXINFO, MSG, SET_WINDOW_POS_FLAGS, SWP_FRAMECHANGED,
                SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOSIZE, SWP_NOZORDER, SW_HIDE, SW_MAXIMIZE,
                SW_MINIMIZE, SW_RESTORE, SW_SHOW, SW_SHOWNORMAL, WINDOWPLACEMENT,
                WINDOW_EX_STYLE, WINDOW_STYLE, WM_APP, WM_CLOSE, WM_DESTROY, WM_ERASEBKGND,
                WM_GETMINMAXINFO, WNDCLASSEXW, WS_MAXIMIZEBOX, WS_MINIMIZEBOX,
                WS_OVERLAPPEDWINDOW, WS_POPUP, WS_SYSMENU, WS_THICKFRAME,
            },
        },
    },
};

use super::{dialogs, dpi, theme};
use crate::{
    dialogs::{DialogButton, MessageDialogRequest, OpenDialogRequest, SaveDialogRequest},
    error::{Result, ShellError},
    events::{Emitter, ShellEvent},
    geometry::{chrome_overhead, track_limits, Point, Rect, ShowState, Size, SizeConstraints},
    platform::{Rgba, ShowCommand, WindowBackend, WindowSpec},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the window class.
const CLASS_NAME: PCWSTR = w!("CasementWindow");

// ── Per-window state ──────────────────────────────────────────────────────────

/// State the window procedure reads through GWLP_USERDATA.
///
/// Boxed by `Win32Window` so its address is stable; the pointer is cleared in
/// WM_DESTROY and the window is destroyed before the box is released.
#[derive(Debug)]
struct WndState {
    constraints: Cell<SizeConstraints>,
    /// Background as a `COLORREF`.
    background: Cell<u32>,
    hide_on_close: bool,
    alive: Cell<bool>,
    /// Cleared when we destroy the window ourselves (on drop) so a stray
    /// WM_QUIT does not reach the host's own loop.
    quit_on_destroy: Cell<bool>,
    events: Emitter,
}

impl Default for WndState {
    fn default() -> Self {
        Self {
            constraints: Cell::new(SizeConstraints::default()),
            background: Cell::new(Rgba::WHITE.to_colorref()),
            hide_on_close: false,
            alive: Cell::new(false),
            quit_on_destroy: Cell::new(true),
            events: Emitter::default(),
        }
    }
}

/// Style and placement saved while the window is fullscreen.
#[derive(Debug)]
struct FullscreenRestore {
    style: i32,
    placement: WINDOWPLACEMENT,
}

/// The native top-level window.  Destroyed on drop if still alive.
#[derive(Debug, Default)]
pub struct Win32Window {
    hwnd: Option<HWND>,
    state: Box<WndState>,
    restore: Option<FullscreenRestore>,
}

impl Win32Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle, while the OS window exists.
    pub fn hwnd(&self) -> Option<HWND> {
        self.hwnd.filter(|_| self.state.alive.get())
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        if let Some(hwnd) = self.hwnd() {
            self.state.quit_on_destroy.set(false);
            // SAFETY: hwnd is alive (WM_DESTROY has not run).  DestroyWindow
            // dispatches WM_DESTROY synchronously while self.state is still
            // allocated; the handler detaches the pointer before returning.
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
        }
    }
}

// ── Style ─────────────────────────────────────────────────────────────────────

fn window_style(frame: bool, resizable: bool) -> WINDOW_STYLE {
    let base = if frame { WS_OVERLAPPEDWINDOW } else { WS_POPUP };
    if resizable {
        base
    } else {
        (base & !(WS_THICKFRAME | WS_MAXIMIZEBOX)) | WS_MINIMIZEBOX | WS_SYSMENU
    }
}

fn show_cmd(cmd: ShowCommand) -> windows::Win32::UI::WindowsAndMessaging::SHOW_WINDOW_CMD {
    match cmd {
        ShowCommand::Hide => SW_HIDE,
        ShowCommand::Show => SW_SHOW,
        ShowCommand::ShowNormal => SW_SHOWNORMAL,
        ShowCommand::Maximize => SW_MAXIMIZE,
        ShowCommand::Minimize => SW_MINIMIZE,
        ShowCommand::Restore => SW_RESTORE,
    }
}

// ── Backend implementation ────────────────────────────────────────────────────

impl WindowBackend for Win32Window {
    fn create(&mut self, spec: &WindowSpec, events: Emitter) -> Result<()> {
        if self.hwnd().is_some() {
            warn!("window already created; ignoring second create");
            return Ok(());
        }

        dpi::init();

        // SAFETY: GetModuleHandleW(None) returns the module that created the
        // process, which is valid for the process lifetime.
        let hmodule = unsafe { GetModuleHandleW(None) }.map_err(ShellError::from)?;
        let hinstance = HINSTANCE(hmodule.0);

        register_class(hinstance)?;

        // Replace the state before creation: WM_GETMINMAXINFO arrives during
        // CreateWindowExW, but only reads the state once it is attached below.
        self.state = Box::new(WndState {
            constraints: Cell::new(spec.constraints),
            background: Cell::new(spec.background.to_colorref()),
            hide_on_close: spec.hide_on_close,
            alive: Cell::new(false),
            quit_on_destroy: Cell::new(true),
            events,
        });
        self.restore = None;

        let title: Vec<u16> = spec.title.encode_utf16().chain(std::iter::once(0)).collect();

        // SAFETY: CLASS_NAME was just registered; hinstance is the exe's
        // module; title is a null-terminated UTF-16 string that outlives the
        // call.  No parent, no menu, no creation data.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                CLASS_NAME,
                PCWSTR(title.as_ptr()),
                window_style(spec.frame, spec.resizable),
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                spec.size.width,
                spec.size.height,
                None,
                None,
                hinstance,
                None,
            )
        }
        .map_err(|e| ShellError::Win32 {
            function: "CreateWindowExW",
            code: e.code().0 as u32,
        })?;

        // SAFETY: hwnd is the window we just created.  The stored pointer
        // refers to the boxed state, which stays at a fixed address until
        // `self` is dropped, and `drop` destroys the window first.
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, &*self.state as *const WndState as isize);
        }
        self.state.alive.set(true);
        self.hwnd = Some(hwnd);

        info!(?hwnd, frame = spec.frame, resizable = spec.resizable, "window created");
        Ok(())
    }

    fn is_created(&self) -> bool {
        self.hwnd().is_some()
    }

    fn show(&mut self, cmd: ShowCommand) {
        let Some(hwnd) = self.hwnd() else { return };
        // SAFETY: hwnd is alive.  The return value is the previous visibility,
        // not an error indicator.
        unsafe {
            let _ = ShowWindow(hwnd, show_cmd(cmd));
        }
        trace!(?cmd, "ShowWindow");
    }

    fn show_state(&self) -> Option<ShowState> {
        let hwnd = self.hwnd()?;
        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };
        // SAFETY: hwnd is alive; placement.length is set as the API requires.
        match unsafe { GetWindowPlacement(hwnd, &mut placement) } {
            Ok(()) => Some(ShowState::from_show_cmd(placement.showCmd.0 as u32)),
            Err(e) => {
                warn!(error = %e, "GetWindowPlacement failed");
                None
            }
        }
    }

    fn outer_rect(&self) -> Option<Rect> {
        window_rect(self.hwnd()?)
    }

    fn client_rect(&self) -> Option<Rect> {
        client_rect(self.hwnd()?)
    }

    fn work_area(&self) -> Option<Rect> {
        monitor_info(self.hwnd()?).map(|info| from_rect(info.rcWork))
    }

    fn place(&mut self, origin: Option<Point>, size: Option<Size>) {
        let Some(hwnd) = self.hwnd() else { return };

        let mut flags = SET_WINDOW_POS_FLAGS(0);
        if origin.is_none() {
            flags = flags | SWP_NOMOVE;
        }
        if size.is_none() {
            flags = flags | SWP_NOSIZE;
        }
        let origin = origin.unwrap_or_default();
        let size = size.unwrap_or_default();

        // SAFETY: hwnd is alive; HWND_TOP is a documented sentinel.
        let res = unsafe {
            SetWindowPos(hwnd, HWND_TOP, origin.x, origin.y, size.width, size.height, flags)
        };
        if let Err(e) = res {
            warn!(error = %e, "SetWindowPos failed");
        }
    }

    fn set_title(&mut self, title: &str) {
        let Some(hwnd) = self.hwnd() else { return };
        let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: hwnd is alive; wide is null-terminated and outlives the call.
        if let Err(e) = unsafe { SetWindowTextW(hwnd, PCWSTR(wide.as_ptr())) } {
            warn!(error = %e, "SetWindowTextW failed");
        }
    }

    fn set_constraints(&mut self, constraints: SizeConstraints) {
        // Picked up by the next WM_GETMINMAXINFO.
        self.state.constraints.set(constraints);
    }

    fn set_background(&mut self, colour: Rgba) {
        self.state.background.set(colour.to_colorref());
        if let Some(hwnd) = self.hwnd() {
            // SAFETY: hwnd is alive; a null rect invalidates the whole client area.
            unsafe {
                let _ = InvalidateRect(hwnd, None, true);
            }
        }
    }

    fn set_fullscreen(&mut self, on: bool) {
        let Some(hwnd) = self.hwnd() else { return };

        if on {
            if self.restore.is_some() {
                return;
            }
            let mut placement = WINDOWPLACEMENT {
                length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
                ..Default::default()
            };
            // SAFETY: hwnd is alive; placement.length is set.
            if let Err(e) = unsafe { GetWindowPlacement(hwnd, &mut placement) } {
                warn!(error = %e, "fullscreen: GetWindowPlacement failed");
                return;
            }
            let Some(info) = monitor_info(hwnd) else {
                warn!("fullscreen: no monitor for window");
                return;
            };
            let monitor = from_rect(info.rcMonitor);

            // SAFETY: hwnd is alive.  GWL_STYLE is read back unchanged on exit.
            let style = unsafe { GetWindowLongW(hwnd, GWL_STYLE) };
            // SAFETY: as above; SWP_FRAMECHANGED makes the style change take effect.
            unsafe {
                SetWindowLongW(hwnd, GWL_STYLE, style & !(WS_OVERLAPPEDWINDOW.0 as i32));
                let _ = SetWindowPos(
                    hwnd,
                    HWND_TOP,
                    monitor.left,
                    monitor.top,
                    monitor.width(),
                    monitor.height(),
                    SWP_NOOWNERZORDER | SWP_FRAMECHANGED,
                );
            }
            self.restore = Some(FullscreenRestore { style, placement });
            debug!(?monitor, "entered fullscreen");
        } else if let Some(restore) = self.restore.take() {
            // SAFETY: hwnd is alive; style and placement were captured from
            // this same window on entry.
            unsafe {
                SetWindowLongW(hwnd, GWL_STYLE, restore.style);
                let _ = SetWindowPlacement(hwnd, &restore.placement);
                let _ = SetWindowPos(
                    hwnd,
                    None,
                    0,
                    0,
                    0,
                    0,
                    SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_FRAMECHANGED,
                );
            }
            debug!("left fullscreen");
        }
    }

    fn focus(&mut self) {
        let Some(hwnd) = self.hwnd() else { return };
        // SAFETY: hwnd is alive and owned by this thread.
        unsafe {
            let _ = UpdateWindow(hwnd);
            let _ = SetFocus(hwnd);
        }
    }

    fn run_loop(&mut self) -> Result<()> {
        message_loop()
    }

    fn post_quit(&mut self) {
        // SAFETY: PostQuitMessage has no preconditions; it posts WM_QUIT to
        // the calling thread's queue.
        unsafe { PostQuitMessage(0) };
    }

    fn close(&mut self) {
        let Some(hwnd) = self.hwnd() else { return };
        // SAFETY: hwnd is alive.  WM_CLOSE is handled by wnd_proc.
        if let Err(e) = unsafe { PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) } {
            warn!(error = %e, "PostMessageW(WM_CLOSE) failed");
        }
    }

    fn open_dialog(&mut self, request: &OpenDialogRequest) -> Vec<PathBuf> {
        dialogs::show_open_dialog(self.hwnd().unwrap_or_default(), request)
    }

    fn save_dialog(&mut self, request: &SaveDialogRequest) -> Option<PathBuf> {
        dialogs::show_save_dialog(self.hwnd().unwrap_or_default(), request)
    }

    fn message_dialog(&mut self, request: &MessageDialogRequest) -> Option<DialogButton> {
        dialogs::show_message_box(self.hwnd().unwrap_or_default(), request)
    }

    fn dark_mode(&self) -> bool {
        theme::apps_use_dark_theme()
    }
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
/// Used by `main()` when `run()` returns an error.
pub fn show_error_dialog(message: &str) {
    let msg_wide: Vec<u16> = message.encode_utf16().chain(std::iter::once(0)).collect();

    // SAFETY: msg_wide is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.  No owner window.
    // Return value (button pressed) is intentionally unused for an error dialog.
    unsafe {
        let _ = MessageBoxW(
            None,
            PCWSTR(msg_wide.as_ptr()),
            w!("Casement - Fatal Error"),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: LoadCursorW with IDC_ARROW always succeeds; the arrow cursor is
    // a built-in resource guaranteed to exist on all Windows versions.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(ShellError::from)?;

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hCursor: cursor,
        // Painted in WM_ERASEBKGND from the configured colour.
        hbrBackground: HBRUSH::default(),
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        ..Default::default()
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        // A second shell in the same process re-uses the class.
        // SAFETY: GetLastError reads thread-local state; always safe.
        let code = unsafe { GetLastError() };
        if code != ERROR_CLASS_ALREADY_EXISTS {
            return Err(ShellError::Win32 {
                function: "RegisterClassExW",
                code: code.0,
            });
        }
    }

    Ok(())
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop() -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; a null HWND retrieves
        // messages for all windows on this thread plus thread messages.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };

        match ret.0 {
            -1 => {
                // SAFETY: GetLastError reads thread-local state; always safe.
                let code = unsafe { GetLastError() };
                return Err(ShellError::Win32 {
                    function: "GetMessageW",
                    code: code.0,
                });
            }
            // WM_QUIT.
            0 => break,
            _ if msg.hwnd.0.is_null() => {
                // Thread message.  WM_APP is reserved for cross-thread
                // dispatch into the shell and currently carries nothing.
                if msg.message == WM_APP {
                    trace!("WM_APP");
                }
            }
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessageW call.
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            },
        }
    }

    debug!("message loop finished");
    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.  Windows
// guarantees that hwnd, msg, wparam and lparam are valid for this call.
// GWLP_USERDATA is either 0 or a pointer to the WndState boxed by the owning
// Win32Window, which outlives the window (see `Drop for Win32Window`).
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let state = (GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WndState).as_ref();

    match (msg, state) {
        // ── Size negotiation ──────────────────────────────────────────────────
        // Sent during CreateWindowExW before the state is attached.
        (WM_GETMINMAXINFO, None) => LRESULT(0),
        (WM_GETMINMAXINFO, Some(state)) => {
            // SAFETY: for WM_GETMINMAXINFO, lparam points at a MINMAXINFO the
            // system owns for the duration of this call.
            if let Some(mmi) = (lparam.0 as *mut MINMAXINFO).as_mut() {
                apply_track_limits(hwnd, state, mmi);
            }
            LRESULT(0)
        }

        // ── Painting ──────────────────────────────────────────────────────────
        (WM_ERASEBKGND, Some(state)) => {
            // wparam carries the device context to erase.
            paint_background(hwnd, HDC(wparam.0 as *mut _), state.background.get());
            LRESULT(1)
        }

        // ── Lifecycle ─────────────────────────────────────────────────────────
        (WM_CLOSE, Some(state)) => {
            if state.hide_on_close {
                let _ = ShowWindow(hwnd, SW_HIDE);
                state.events.emit(ShellEvent::Closed { hidden: true });
            } else {
                state.events.emit(ShellEvent::Closed { hidden: false });
                // Triggers WM_DESTROY, which posts WM_QUIT.
                let _ = DestroyWindow(hwnd);
            }
            LRESULT(0)
        }

        (WM_DESTROY, state) => {
            let quit = state.map_or(true, |s| s.quit_on_destroy.get());
            if let Some(state) = state {
                state.alive.set(false);
                // Detach so no later message can reach the state.
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            }
            if quit {
                PostQuitMessage(0);
            }
            LRESULT(0)
        }

        // Default processing for all unhandled messages.
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Fill `MINMAXINFO` from the logical bounds, this window's DPI and its chrome.
fn apply_track_limits(hwnd: HWND, state: &WndState, mmi: &mut MINMAXINFO) {
    let (Some(outer), Some(client)) = (window_rect(hwnd), client_rect(hwnd)) else {
        return;
    };
    let limits = track_limits(
        &state.constraints.get(),
        dpi::scale_for_window(hwnd),
        chrome_overhead(outer, client),
    );

    let point = |s: Size| POINT {
        x: s.width,
        y: s.height,
    };
    if let Some(min) = limits.min_track {
        mmi.ptMinTrackSize = point(min);
    }
    if let Some(max) = limits.max_size {
        mmi.ptMaxSize = point(max);
    }
    if let Some(max) = limits.max_track {
        mmi.ptMaxTrackSize = point(max);
    }
}

fn paint_background(hwnd: HWND, hdc: HDC, colorref: u32) {
    let mut rc = RECT::default();
    // SAFETY: hwnd is the window being painted; rc is a valid out-pointer.
    if unsafe { GetClientRect(hwnd, &mut rc) }.is_err() {
        return;
    }
    // SAFETY: hdc is the DC supplied with WM_ERASEBKGND.  The brush is
    // created, used and deleted within this block.
    unsafe {
        let brush = CreateSolidBrush(COLORREF(colorref));
        FillRect(hdc, &rc, brush);
        let _ = DeleteObject(HGDIOBJ(brush.0));
    }
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

fn from_rect(rc: RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right, rc.bottom)
}

fn window_rect(hwnd: HWND) -> Option<Rect> {
    let mut rc = RECT::default();
    // SAFETY: hwnd is a window on this thread; rc is a valid out-pointer.
    unsafe { GetWindowRect(hwnd, &mut rc) }.ok()?;
    Some(from_rect(rc))
}

fn client_rect(hwnd: HWND) -> Option<Rect> {
    let mut rc = RECT::default();
    // SAFETY: as window_rect.
    unsafe { GetClientRect(hwnd, &mut rc) }.ok()?;
    Some(from_rect(rc))
}

fn monitor_info(hwnd: HWND) -> Option<MONITORINFO> {
    // SAFETY: MONITOR_DEFAULTTONEAREST always yields a monitor handle.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    // SAFETY: info.cbSize is set; info is a valid out-pointer.
    unsafe { GetMonitorInfoW(monitor, &mut info) }
        .as_bool()
        .then_some(info)
}
