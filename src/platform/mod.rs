// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface that `Shell` uses to talk to the OS.  No
// `unsafe` lives here; all Win32 FFI is confined to the `win32` sub-module and
// never leaks outward.  `headless` implements the same interface without a
// window system and backs the shell on other targets and in tests.

use std::path::PathBuf;

use crate::{
    dialogs::{DialogButton, MessageDialogRequest, OpenDialogRequest, SaveDialogRequest},
    error::Result,
    events::Emitter,
    geometry::{Point, Rect, ShowState, Size, SizeConstraints},
};

pub mod headless;
#[cfg(windows)]
pub mod win32;

/// Backend used by `Shell::new`.
#[cfg(windows)]
pub type NativeBackend = win32::window::Win32Window;
#[cfg(not(windows))]
pub type NativeBackend = headless::HeadlessWindow;

// ── Value types crossing the seam ─────────────────────────────────────────────

/// The subset of `SW_*` commands the shell issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Hide,
    Show,
    /// Activate and show in the normal (restored) state; used on first show.
    ShowNormal,
    Maximize,
    Minimize,
    Restore,
}

/// Window background colour.  Alpha is recorded but Win32 top-level windows
/// paint opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Clamp C `int` components into 0..=255.
    pub fn from_ints(r: i32, g: i32, b: i32, a: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::new(c(r), c(g), c(b), c(a))
    }

    /// Win32 `COLORREF` layout: `0x00BBGGRR`.
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Everything a backend needs to create the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    /// Outer size in device pixels.
    pub size: Size,
    pub frame: bool,
    pub resizable: bool,
    pub start_hidden: bool,
    pub hide_on_close: bool,
    pub constraints: SizeConstraints,
    pub background: Rgba,
}

// ── The seam ──────────────────────────────────────────────────────────────────

/// One native top-level window plus the thread's message loop.
///
/// Operations issued before `create` (or after the OS destroyed the window)
/// are ignored and queries return `None`.
pub trait WindowBackend {
    /// Register the class and create the window, hidden.  `events` receives
    /// lifecycle notifications raised from inside the message loop.
    fn create(&mut self, spec: &WindowSpec, events: Emitter) -> Result<()>;

    /// `true` while a live native window exists.
    fn is_created(&self) -> bool;

    fn show(&mut self, cmd: ShowCommand);

    /// Placement state; `None` if there is no window or the query failed.
    fn show_state(&self) -> Option<ShowState>;

    /// Outer window rectangle in screen coordinates.
    fn outer_rect(&self) -> Option<Rect>;

    /// Client rectangle (origin is always 0,0).
    fn client_rect(&self) -> Option<Rect>;

    /// Work area of the monitor currently hosting the window.
    fn work_area(&self) -> Option<Rect>;

    /// Move and/or resize the outer window, bringing it to the top.
    fn place(&mut self, origin: Option<Point>, size: Option<Size>);

    fn set_title(&mut self, title: &str);

    /// New logical min/max bounds for size negotiation.
    fn set_constraints(&mut self, constraints: SizeConstraints);

    fn set_background(&mut self, colour: Rgba);

    /// Enter (`true`) or leave borderless monitor-sized mode.
    fn set_fullscreen(&mut self, on: bool);

    /// Paint immediately and take keyboard focus.
    fn focus(&mut self);

    /// Block in the message loop until the quit signal arrives.
    fn run_loop(&mut self) -> Result<()>;

    /// Post the quit signal to the owning thread.
    fn post_quit(&mut self);

    /// Ask the window to close, as if the user clicked the close button.
    fn close(&mut self);

    fn open_dialog(&mut self, request: &OpenDialogRequest) -> Vec<PathBuf>;

    fn save_dialog(&mut self, request: &SaveDialogRequest) -> Option<PathBuf>;

    /// `None` when the dialog could not be shown.
    fn message_dialog(&mut self, request: &MessageDialogRequest) -> Option<DialogButton>;

    /// Whether the OS prefers dark application themes.
    fn dark_mode(&self) -> bool;
}
