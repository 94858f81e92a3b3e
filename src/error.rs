// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Casement return `error::Result<T>`.  Window
// creation and the message loop propagate; best-effort OS calls (show, move,
// caption) log and carry on.

/// Every error that Casement can produce.
#[derive(Debug)]
pub enum ShellError {
    /// A Win32 API call returned a failure code.
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// An operation needed the native window before `run()` created it.
    NotCreated(&'static str),

    /// A string crossing the C surface was null or not valid UTF-8.
    InvalidString(&'static str),

    /// The configuration file could not be parsed.
    Config(serde_json::Error),

    /// A standard I/O error (reading the configuration file, …).
    Io(std::io::Error),
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win32 { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::NotCreated(op) => write!(f, "{op}: the window has not been created yet"),
            Self::InvalidString(arg) => write!(f, "invalid string argument `{arg}`"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Win32 { .. } | Self::NotCreated(_) | Self::InvalidString(_) => None,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

// Convert a windows-crate error (HRESULT) directly into a ShellError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for ShellError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_error_displays_function_and_hex_code() {
        let e = ShellError::Win32 {
            function: "CreateWindowExW",
            code: 0x57,
        };
        assert_eq!(e.to_string(), "CreateWindowExW failed (error 0x00000057)");
    }

    #[test]
    fn config_error_keeps_its_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e = ShellError::from(json_err);
        assert!(std::error::Error::source(&e).is_some());
        assert!(e.to_string().starts_with("invalid configuration"));
    }
}
