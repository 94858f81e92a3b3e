// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use casement::{Result, Shell, ShellConfig};
use tracing::info;

/// Smallest size the demo window can be dragged to, in logical pixels.
const DEMO_MIN_SIZE: (i32, i32) = (400, 300);

fn run() -> Result<()> {
    // Optional first argument: path to a JSON configuration file.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ShellConfig::load(&path)?,
        None => ShellConfig::default(),
    };

    let mut shell = Shell::new(config);
    shell.init_logging();
    shell.set_min_size(DEMO_MIN_SIZE.0, DEMO_MIN_SIZE.1);
    shell.set_event_sink(Box::new(|event| info!(?event, "shell event")));
    shell.run()
}

fn main() {
    if let Err(e) = run() {
        // Startup failed before or during the message loop.
        report_fatal(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn report_fatal(message: &str) {
    // A modal dialog is the only reliable output path in a GUI app.
    casement::platform::win32::window::show_error_dialog(message);
}

#[cfg(not(windows))]
fn report_fatal(message: &str) {
    eprintln!("casement: {message}");
}
