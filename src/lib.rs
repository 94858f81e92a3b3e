//! # Casement
//!
//! A native window shell: one top-level OS window, the thread's message loop,
//! and the window operations an application layer needs (visibility,
//! minimise/maximise, size bounds, title, centering, fullscreen, dialogs).
//!
//! Rust callers use [`Shell`] directly; other languages go through the flat
//! C surface in [`ffi`].  On Windows the shell drives a real Win32 window; on
//! other targets it runs over [`platform::headless::HeadlessWindow`].

// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / WinAPI FFI
//   • `ffi`             – the exported C surface
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

pub mod config;
pub mod dialogs;
pub mod error;
pub mod events;
pub mod ffi;
pub mod geometry;
pub mod logging;
pub mod platform;
pub mod shell;

pub use config::{LogLevel, ShellConfig};
pub use error::{Result, ShellError};
pub use events::ShellEvent;
pub use shell::Shell;
