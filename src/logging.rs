// ── Logging setup ─────────────────────────────────────────────────────────────
//
// Installs a `tracing-subscriber` fmt subscriber once per process.  `RUST_LOG`
// wins when set; otherwise the configured level applies, raised to `debug`
// while the shell's debug flag is on.  The level filter sits behind a reload
// layer so the debug flag can change it after installation.

use std::sync::OnceLock;

use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LogLevel;

/// Control over the filter of the subscriber this crate installed.
struct FilterControl {
    handle: reload::Handle<EnvFilter, Registry>,
    /// The filter came from `RUST_LOG`; leave it alone.
    from_env: bool,
}

static FILTER: OnceLock<FilterControl> = OnceLock::new();

/// Build the filter directive for `level` and the debug flag.
pub(crate) fn directive(level: LogLevel, debug: bool) -> &'static str {
    match (level, debug) {
        (LogLevel::Trace, _) => LogLevel::Trace.as_directive(),
        (_, true) => LogLevel::Debug.as_directive(),
        (other, false) => other.as_directive(),
    }
}

/// Initialise the global subscriber.
///
/// Returns `false` if a subscriber was already installed (by an earlier call
/// or by the host process); the existing one is left in place.
pub fn init(level: LogLevel, debug: bool) -> bool {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(directive(level, debug)), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .is_ok();
    if installed {
        let _ = FILTER.set(FilterControl { handle, from_env });
    }
    installed
}

/// Re-apply `level` with the debug flag to the installed subscriber.
///
/// Returns `true` if the filter changed.  Does nothing when this crate did
/// not install the subscriber or when `RUST_LOG` chose the filter.
pub fn set_debug(level: LogLevel, debug: bool) -> bool {
    let Some(control) = FILTER.get() else {
        return false;
    };
    if control.from_env {
        return false;
    }
    match control.handle.reload(EnvFilter::new(directive(level, debug))) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "log filter reload failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_quiet_levels() {
        assert_eq!(directive(LogLevel::Error, true), "debug");
        assert_eq!(directive(LogLevel::Info, true), "debug");
        assert_eq!(directive(LogLevel::Trace, true), "trace");
    }

    #[test]
    fn level_passes_through_without_debug() {
        assert_eq!(directive(LogLevel::Warning, false), "warn");
        assert_eq!(directive(LogLevel::Info, false), "info");
    }

    #[test]
    fn second_init_is_harmless() {
        let _ = init(LogLevel::Info, false);
        assert!(!init(LogLevel::Debug, false));
    }
}
