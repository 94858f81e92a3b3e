// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module in the library where `unsafe` code is permitted besides the
// C surface in `ffi`.  Every `unsafe` block MUST carry a `// SAFETY:` comment
// that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod dialogs; // common open/save dialogs and message boxes
pub mod window; // top-level window, WndProc, message loop

pub(crate) mod dpi; // per-monitor DPI v2 helpers
pub(crate) mod theme; // app theme (light/dark) from the registry
