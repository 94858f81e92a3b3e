// ── Shell configuration ───────────────────────────────────────────────────────
//
// The immutable initial configuration handed over by the application layer,
// either field-by-field through the C surface or as a JSON document.
// No `unsafe` here.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ── Log level ─────────────────────────────────────────────────────────────────

/// Verbosity requested by the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl LogLevel {
    /// Map the integer levels used on the C surface.
    ///
    /// 1 = trace, 2 = debug, 3 = info, 4 = warning, 5 = error.  Anything else
    /// falls back to info.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Trace,
            2 => Self::Debug,
            4 => Self::Warning,
            5 => Self::Error,
            _ => Self::Info,
        }
    }

    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

// ── ShellConfig ───────────────────────────────────────────────────────────────

/// Initial window configuration.
///
/// Missing JSON fields take their `Default` values, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    pub title: String,
    /// Requested outer width in logical pixels.
    pub width: i32,
    /// Requested outer height in logical pixels.
    pub height: i32,
    pub resizable: bool,
    /// Reserved for the embedded web surface; recorded only.
    pub devtools: bool,
    /// Enter fullscreen right after the window is first shown.
    pub fullscreen: bool,
    pub start_hidden: bool,
    pub log_level: LogLevel,
    /// Hide the window on close instead of ending the message loop.
    pub hide_window_on_close: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "Casement".to_owned(),
            width: 1024,
            height: 768,
            resizable: true,
            devtools: false,
            fullscreen: false,
            start_hidden: false,
            log_level: LogLevel::Info,
            hide_window_on_close: false,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = ShellConfig::from_json("{}").expect("parse");
        assert_eq!(cfg, ShellConfig::default());
        assert!(cfg.resizable);
        assert_eq!(cfg.log_level, LogLevel::Info);
    }

    #[test]
    fn camel_case_fields_are_read() {
        let json = r#"{
            "title": "Demo",
            "width": 800,
            "height": 600,
            "resizable": false,
            "startHidden": true,
            "hideWindowOnClose": true,
            "logLevel": "debug"
        }"#;
        let cfg = ShellConfig::from_json(json).expect("parse");
        assert_eq!(cfg.title, "Demo");
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert!(!cfg.resizable);
        assert!(cfg.start_hidden);
        assert!(cfg.hide_window_on_close);
        assert!(!cfg.fullscreen);
        assert_eq!(cfg.log_level, LogLevel::Debug);
    }

    #[test]
    fn warn_is_accepted_as_alias() {
        let cfg = ShellConfig::from_json(r#"{"logLevel":"warn"}"#).expect("parse");
        assert_eq!(cfg.log_level, LogLevel::Warning);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ShellConfig::from_json("{\"width\": \"wide\"}").unwrap_err();
        assert!(matches!(err, crate::error::ShellError::Config(_)));
    }

    #[test]
    fn raw_levels_map_like_the_c_surface() {
        assert_eq!(LogLevel::from_raw(1), LogLevel::Trace);
        assert_eq!(LogLevel::from_raw(2), LogLevel::Debug);
        assert_eq!(LogLevel::from_raw(3), LogLevel::Info);
        assert_eq!(LogLevel::from_raw(4), LogLevel::Warning);
        assert_eq!(LogLevel::from_raw(5), LogLevel::Error);
        assert_eq!(LogLevel::from_raw(0), LogLevel::Info);
        assert_eq!(LogLevel::from_raw(42), LogLevel::Info);
    }

    #[test]
    fn load_reads_a_file() {
        let path = std::env::temp_dir().join(format!("casement-cfg-{}.json", std::process::id()));
        fs::write(&path, r#"{"title":"From disk","width":640}"#).expect("write");
        let cfg = ShellConfig::load(&path).expect("load");
        let _ = fs::remove_file(&path);
        assert_eq!(cfg.title, "From disk");
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 768);
    }
}
