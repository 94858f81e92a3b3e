// ── Window shell ──────────────────────────────────────────────────────────────
//
// A single `Shell` is created on startup and owns the configuration, the
// mutable window settings and the platform window.  All calls are expected on
// the thread that created it; off-thread calls are logged, not rejected.
// No `unsafe` here.

use std::thread::{self, ThreadId};

use tracing::{debug, info, warn};

use crate::{
    config::ShellConfig,
    dialogs::{DialogButton, MessageDialogRequest, OpenDialogRequest, SaveDialogRequest},
    error::Result,
    events::{Emitter, EventSink, ShellEvent},
    geometry::{centered_origin, Point, ShowState, Size, SizeConstraints},
    logging,
    platform::{NativeBackend, Rgba, ShowCommand, WindowBackend, WindowSpec},
};

/// The window-shell record.
///
/// Created with an immutable [`ShellConfig`]; min/max bounds, frame, title,
/// colour and the debug flag are adjusted in place by the setters.
#[derive(Debug)]
pub struct Shell<B: WindowBackend = NativeBackend> {
    config: ShellConfig,
    title: String,
    constraints: SizeConstraints,
    frame: bool,
    debug: bool,
    fullscreen: bool,
    background: Rgba,
    owner: ThreadId,
    events: Emitter,
    backend: B,
}

impl Shell<NativeBackend> {
    /// A shell backed by the platform's native window.
    pub fn new(config: ShellConfig) -> Self {
        Self::with_backend(config, NativeBackend::default())
    }
}

impl<B: WindowBackend> Shell<B> {
    pub fn with_backend(config: ShellConfig, backend: B) -> Self {
        Self {
            title: config.title.clone(),
            config,
            constraints: SizeConstraints::default(),
            // Framed by default.
            frame: true,
            debug: false,
            fullscreen: false,
            background: Rgba::WHITE,
            owner: thread::current().id(),
            events: Emitter::default(),
            backend,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Current caption (initially the configured title).
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    pub fn has_frame(&self) -> bool {
        self.frame
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Fullscreen state of the live window; `false` once it is gone.
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen && self.backend.is_created()
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn owner_thread(&self) -> ThreadId {
        self.owner
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Route results and lifecycle notifications to `sink`.
    pub fn set_event_sink(&mut self, sink: EventSink) {
        self.events.set(sink);
    }

    pub fn clear_event_sink(&mut self) {
        self.events.clear();
    }

    /// Install the global `tracing` subscriber at the configured level.
    pub fn init_logging(&self) -> bool {
        logging::init(self.config.log_level, self.debug)
    }

    fn window(&mut self, op: &'static str) -> &mut B {
        if thread::current().id() != self.owner {
            warn!(op, "called off the thread that owns the window");
        }
        &mut self.backend
    }

    fn emit(&self, event: ShellEvent) {
        debug!(?event, "emit");
        self.events.emit(event);
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Create the window, show it and block in the message loop until the
    /// quit signal arrives.
    pub fn run(&mut self) -> Result<()> {
        let spec = WindowSpec {
            title: self.title.clone(),
            size: Size::new(self.config.width, self.config.height),
            frame: self.frame,
            resizable: self.config.resizable,
            start_hidden: self.config.start_hidden,
            hide_on_close: self.config.hide_window_on_close,
            constraints: self.constraints,
            background: self.background,
        };
        info!(title = %spec.title, width = spec.size.width, height = spec.size.height, "starting shell");

        let fresh = !self.backend.is_created();
        let events = self.events.clone();
        self.window("run").create(&spec, events)?;
        if fresh {
            // A new window never starts fullscreen.
            self.fullscreen = false;
        }

        self.center();
        let visibility = if spec.start_hidden {
            ShowCommand::Hide
        } else {
            ShowCommand::ShowNormal
        };
        self.backend.show(visibility);
        self.backend.focus();

        if self.config.fullscreen {
            self.fullscreen();
        }

        self.backend.run_loop()?;
        info!("shell stopped");
        Ok(())
    }

    /// Post the quit signal; `run` returns once the loop sees it.
    pub fn destroy(&mut self) {
        self.window("destroy").post_quit();
    }

    /// Close the window as the user would.  With hide-on-close the window is
    /// only hidden; otherwise it is destroyed and the loop ends.
    pub fn quit(&mut self) {
        self.window("quit").close();
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    pub fn set_debug(&mut self, flag: bool) {
        self.debug = flag;
        logging::set_debug(self.config.log_level, flag);
        debug!(flag, "debug flag");
    }

    pub fn set_min_size(&mut self, width: i32, height: i32) {
        self.constraints.min_width = width;
        self.constraints.min_height = height;
        let constraints = self.constraints;
        self.window("set_min_size").set_constraints(constraints);
    }

    pub fn set_max_size(&mut self, width: i32, height: i32) {
        self.constraints.max_width = width;
        self.constraints.max_height = height;
        let constraints = self.constraints;
        self.window("set_max_size").set_constraints(constraints);
    }

    /// Create the window borderless.  Only affects a window not yet created.
    pub fn disable_frame(&mut self) {
        self.frame = false;
        if self.backend.is_created() {
            debug!("disable_frame after creation applies to the next window only");
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_owned();
        self.window("set_title").set_title(title);
    }

    pub fn set_colour(&mut self, red: i32, green: i32, blue: i32, alpha: i32) {
        self.background = Rgba::from_ints(red, green, blue, alpha);
        let colour = self.background;
        self.window("set_colour").set_background(colour);
    }

    // ── Visibility ────────────────────────────────────────────────────────────

    pub fn show(&mut self) {
        self.window("show").show(ShowCommand::Show);
    }

    pub fn hide(&mut self) {
        self.window("hide").show(ShowCommand::Hide);
    }

    /// Centre in the work area of the monitor hosting the window, using the
    /// outer rectangle when framed and the client rectangle otherwise.
    pub fn center(&mut self) {
        let frame = self.frame;
        let backend = self.window("center");
        let Some(work) = backend.work_area() else {
            debug!("center: no window");
            return;
        };
        let extent = if frame {
            backend.outer_rect()
        } else {
            backend.client_rect()
        };
        let Some(extent) = extent else { return };
        let origin = centered_origin(work, extent.size());
        backend.place(Some(origin), None);
    }

    // ── Maximise / minimise ───────────────────────────────────────────────────

    pub fn is_maximised(&self) -> bool {
        self.backend.show_state() == Some(ShowState::Maximized)
    }

    pub fn maximise(&mut self) {
        self.window("maximise").show(ShowCommand::Maximize);
    }

    pub fn unmaximise(&mut self) {
        self.window("unmaximise").show(ShowCommand::Restore);
    }

    pub fn toggle_maximise(&mut self) {
        if self.is_maximised() {
            self.unmaximise();
        } else {
            self.maximise();
        }
    }

    pub fn is_minimised(&self) -> bool {
        self.backend.show_state() == Some(ShowState::Minimized)
    }

    pub fn minimise(&mut self) {
        self.window("minimise").show(ShowCommand::Minimize);
    }

    pub fn unminimise(&mut self) {
        self.window("unminimise").show(ShowCommand::Restore);
    }

    pub fn toggle_minimise(&mut self) {
        if self.is_minimised() {
            self.unminimise();
        } else {
            self.minimise();
        }
    }

    // ── Size & position ───────────────────────────────────────────────────────

    /// Resize the outer window.  Non-positive sizes are ignored.
    pub fn set_size(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            warn!(width, height, "set_size: ignoring non-positive size");
            return;
        }
        self.window("set_size")
            .place(None, Some(Size::new(width, height)));
    }

    /// Move the window; `x`/`y` are relative to the hosting monitor's work area.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let backend = self.window("set_position");
        let Some(work) = backend.work_area() else {
            debug!("set_position: no window");
            return;
        };
        let origin = Point::new(work.left.saturating_add(x), work.top.saturating_add(y));
        backend.place(Some(origin), None);
    }

    // ── Fullscreen ────────────────────────────────────────────────────────────

    pub fn fullscreen(&mut self) {
        if self.is_fullscreen() || !self.backend.is_created() {
            return;
        }
        self.window("fullscreen").set_fullscreen(true);
        self.fullscreen = true;
    }

    pub fn unfullscreen(&mut self) {
        if !self.is_fullscreen() {
            self.fullscreen = false;
            return;
        }
        self.window("unfullscreen").set_fullscreen(false);
        self.fullscreen = false;
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.is_fullscreen() {
            self.unfullscreen();
        } else {
            self.fullscreen();
        }
    }

    // ── Dialogs ───────────────────────────────────────────────────────────────

    pub fn open_dialog(&mut self, callback_id: &str, request: &OpenDialogRequest) {
        let paths = self.window("open_dialog").open_dialog(request);
        self.emit(ShellEvent::OpenDialogResult {
            callback_id: callback_id.to_owned(),
            paths: paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        });
    }

    pub fn save_dialog(&mut self, callback_id: &str, request: &SaveDialogRequest) {
        let path = self.window("save_dialog").save_dialog(request);
        self.emit(ShellEvent::SaveDialogResult {
            callback_id: callback_id.to_owned(),
            path: path.map(|p| p.to_string_lossy().into_owned()),
        });
    }

    pub fn message_dialog(&mut self, callback_id: &str, request: &MessageDialogRequest) {
        // A box that could not be shown answers as if cancelled.
        let pressed = self
            .window("message_dialog")
            .message_dialog(request)
            .unwrap_or_else(|| {
                warn!(callback_id, "message dialog could not be shown");
                DialogButton::Cancel
            });
        self.emit(ShellEvent::MessageDialogResult {
            callback_id: callback_id.to_owned(),
            button: request.answer_label(pressed),
        });
    }

    pub fn dark_mode_enabled(&mut self, callback_id: &str) {
        let enabled = self.window("dark_mode_enabled").dark_mode();
        self.emit(ShellEvent::DarkModeResult {
            callback_id: callback_id.to_owned(),
            enabled,
        });
    }

    // ── Extension points ──────────────────────────────────────────────────────
    //
    // Reserved for the embedded web surface and native menus.  Accepted and
    // ignored.

    fn ignored(&self, op: &'static str, payload: &str) {
        debug!(op, bytes = payload.len(), "not supported by this shell; ignored");
    }

    pub fn set_bindings(&mut self, bindings: &str) {
        self.ignored("set_bindings", bindings);
    }

    pub fn exec_js(&mut self, script: &str) {
        self.ignored("exec_js", script);
    }

    pub fn set_application_menu(&mut self, menu_json: &str) {
        self.ignored("set_application_menu", menu_json);
    }

    pub fn add_tray_menu(&mut self, menu_json: &str) {
        self.ignored("add_tray_menu", menu_json);
    }

    pub fn set_tray_menu(&mut self, menu_json: &str) {
        self.ignored("set_tray_menu", menu_json);
    }

    pub fn delete_tray_menu_by_id(&mut self, id: &str) {
        self.ignored("delete_tray_menu_by_id", id);
    }

    pub fn update_tray_menu_label(&mut self, label_json: &str) {
        self.ignored("update_tray_menu_label", label_json);
    }

    pub fn add_context_menu(&mut self, menu_json: &str) {
        self.ignored("add_context_menu", menu_json);
    }

    pub fn update_context_menu(&mut self, menu_json: &str) {
        self.ignored("update_context_menu", menu_json);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
