// ── Headless backend ──────────────────────────────────────────────────────────
//
// A window-system-free `WindowBackend`.  It keeps the same geometry and
// placement bookkeeping a real window would, applies size negotiation with
// the shared `geometry` rules, and records every show command so callers can
// assert on exactly what was issued.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::{Rgba, ShowCommand, WindowBackend, WindowSpec};
use crate::{
    dialogs::{DialogButton, MessageDialogRequest, OpenDialogRequest, SaveDialogRequest},
    error::Result,
    events::{Emitter, ShellEvent},
    geometry::{track_limits, DpiScale, Point, Rect, ShowState, Size, SizeConstraints, BASE_DPI},
};

/// Non-client overhead of a framed window at 96 DPI (borders + caption).
pub const FRAME_CHROME: Size = Size {
    width: 16,
    height: 39,
};

/// Simulated window.
#[derive(Debug)]
pub struct HeadlessWindow {
    created: bool,
    visible: bool,
    state: ShowState,
    title: String,
    rect: Rect,
    chrome: Size,
    work_area: Rect,
    dpi: u32,
    constraints: SizeConstraints,
    background: Rgba,
    hide_on_close: bool,
    fullscreen_restore: Option<Rect>,
    quit_posted: bool,
    events: Emitter,
    commands: Vec<ShowCommand>,
    dark_mode: bool,
    open_answer: Vec<PathBuf>,
    save_answer: Option<PathBuf>,
    message_answer: Option<DialogButton>,
}

impl HeadlessWindow {
    /// A 1920×1040 work area at 96 DPI.
    pub fn new() -> Self {
        Self::with_work_area(Rect::new(0, 0, 1920, 1040))
    }

    pub fn with_work_area(work_area: Rect) -> Self {
        Self {
            created: false,
            visible: false,
            state: ShowState::Hidden,
            title: String::new(),
            rect: Rect::default(),
            chrome: FRAME_CHROME,
            work_area,
            dpi: BASE_DPI,
            constraints: SizeConstraints::default(),
            background: Rgba::WHITE,
            hide_on_close: false,
            fullscreen_restore: None,
            quit_posted: false,
            events: Emitter::default(),
            commands: Vec::new(),
            dark_mode: false,
            open_answer: Vec::new(),
            save_answer: None,
            message_answer: None,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    // ── Scripted answers ──────────────────────────────────────────────────────

    pub fn set_dark_mode(&mut self, on: bool) {
        self.dark_mode = on;
    }

    pub fn answer_open_dialog(&mut self, paths: Vec<PathBuf>) {
        self.open_answer = paths;
    }

    pub fn answer_save_dialog(&mut self, path: Option<PathBuf>) {
        self.save_answer = path;
    }

    pub fn answer_message_dialog(&mut self, button: Option<DialogButton>) {
        self.message_answer = button;
    }

    // ── Inspection ────────────────────────────────────────────────────────────

    /// Every show command issued so far, in order.
    pub fn commands(&self) -> &[ShowCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn quit_posted(&self) -> bool {
        self.quit_posted
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    /// Clamp an outer size the way WM_GETMINMAXINFO would.
    fn negotiate(&self, size: Size) -> Size {
        let limits = track_limits(&self.constraints, DpiScale::uniform(self.dpi), self.chrome);
        let mut out = size;
        if let Some(min) = limits.min_track {
            out.width = out.width.max(min.width);
            out.height = out.height.max(min.height);
        }
        if let Some(max) = limits.max_track {
            out.width = out.width.min(max.width);
            out.height = out.height.min(max.height);
        }
        out
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowBackend for HeadlessWindow {
    fn create(&mut self, spec: &WindowSpec, events: Emitter) -> Result<()> {
        if self.created {
            debug!("headless window already created");
            return Ok(());
        }
        self.events = events;
        self.title = spec.title.clone();
        self.chrome = if spec.frame { FRAME_CHROME } else { Size::default() };
        self.constraints = spec.constraints;
        self.background = spec.background;
        self.hide_on_close = spec.hide_on_close;
        self.fullscreen_restore = None;
        let size = self.negotiate(spec.size);
        self.rect = Rect::from_origin_size(self.work_area.origin(), size);
        self.state = ShowState::Hidden;
        self.visible = false;
        self.quit_posted = false;
        self.created = true;
        debug!(rect = ?self.rect, "headless window created");
        Ok(())
    }

    fn is_created(&self) -> bool {
        self.created
    }

    fn show(&mut self, cmd: ShowCommand) {
        if !self.created {
            return;
        }
        self.commands.push(cmd);
        match cmd {
            ShowCommand::Hide => self.visible = false,
            ShowCommand::Show => {
                self.visible = true;
                if self.state == ShowState::Hidden {
                    self.state = ShowState::Normal;
                }
            }
            ShowCommand::ShowNormal | ShowCommand::Restore => {
                self.visible = true;
                self.state = ShowState::Normal;
            }
            ShowCommand::Maximize => {
                self.visible = true;
                self.state = ShowState::Maximized;
            }
            ShowCommand::Minimize => {
                self.visible = true;
                self.state = ShowState::Minimized;
            }
        }
    }

    fn show_state(&self) -> Option<ShowState> {
        self.created.then_some(self.state)
    }

    fn outer_rect(&self) -> Option<Rect> {
        self.created.then_some(self.rect)
    }

    fn client_rect(&self) -> Option<Rect> {
        let outer = self.outer_rect()?;
        Some(Rect::new(
            0,
            0,
            outer.width().saturating_sub(self.chrome.width),
            outer.height().saturating_sub(self.chrome.height),
        ))
    }

    fn work_area(&self) -> Option<Rect> {
        self.created.then_some(self.work_area)
    }

    fn place(&mut self, origin: Option<Point>, size: Option<Size>) {
        if !self.created {
            return;
        }
        let origin = origin.unwrap_or(self.rect.origin());
        let size = size.map_or(self.rect.size(), |s| self.negotiate(s));
        self.rect = Rect::from_origin_size(origin, size);
        trace!(rect = ?self.rect, "placed");
    }

    fn set_title(&mut self, title: &str) {
        if self.created {
            self.title = title.to_owned();
        }
    }

    fn set_constraints(&mut self, constraints: SizeConstraints) {
        self.constraints = constraints;
    }

    fn set_background(&mut self, colour: Rgba) {
        self.background = colour;
    }

    fn set_fullscreen(&mut self, on: bool) {
        if !self.created {
            return;
        }
        match (on, self.fullscreen_restore.take()) {
            (true, None) => {
                self.fullscreen_restore = Some(self.rect);
                self.rect = self.work_area;
            }
            (true, Some(saved)) => self.fullscreen_restore = Some(saved),
            (false, Some(saved)) => self.rect = saved,
            (false, None) => {}
        }
    }

    fn focus(&mut self) {}

    fn run_loop(&mut self) -> Result<()> {
        // No message source: behave as if the quit signal arrived at once.
        debug!(quit_posted = self.quit_posted, "headless message loop");
        Ok(())
    }

    fn post_quit(&mut self) {
        self.quit_posted = true;
    }

    fn close(&mut self) {
        if !self.created {
            return;
        }
        if self.hide_on_close {
            self.show(ShowCommand::Hide);
            self.events.emit(ShellEvent::Closed { hidden: true });
        } else {
            self.events.emit(ShellEvent::Closed { hidden: false });
            self.created = false;
            self.visible = false;
            self.post_quit();
        }
    }

    fn open_dialog(&mut self, _request: &OpenDialogRequest) -> Vec<PathBuf> {
        self.open_answer.clone()
    }

    fn save_dialog(&mut self, _request: &SaveDialogRequest) -> Option<PathBuf> {
        self.save_answer.clone()
    }

    fn message_dialog(&mut self, _request: &MessageDialogRequest) -> Option<DialogButton> {
        self.message_answer
    }

    fn dark_mode(&self) -> bool {
        self.dark_mode
    }
}
