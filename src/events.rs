// ── Events for the application layer ──────────────────────────────────────────
//
// Results of asynchronous-looking operations (dialogs, theme queries) and
// window lifecycle notifications.  The C surface forwards each event as a
// JSON string; Rust callers receive the enum directly.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::Serialize;
use tracing::warn;

/// Something the application layer should hear about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ShellEvent {
    OpenDialogResult {
        callback_id: String,
        paths: Vec<String>,
    },
    SaveDialogResult {
        callback_id: String,
        path: Option<String>,
    },
    MessageDialogResult {
        callback_id: String,
        button: String,
    },
    DarkModeResult {
        callback_id: String,
        enabled: bool,
    },
    /// The user closed the window.  `hidden` is true when hide-on-close kept
    /// the window alive.
    Closed { hidden: bool },
}

impl ShellEvent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Receiver installed by the application layer.
pub type EventSink = Box<dyn FnMut(ShellEvent)>;

/// Shared handle to the installed sink.
///
/// Cloned into the platform backend so the window procedure can report
/// lifecycle events while the message loop is running.  Single-threaded.
#[derive(Clone, Default)]
pub struct Emitter {
    sink: Rc<RefCell<Option<EventSink>>>,
}

impl Emitter {
    pub fn set(&self, sink: EventSink) {
        *self.sink.borrow_mut() = Some(sink);
    }

    pub fn clear(&self) {
        self.sink.borrow_mut().take();
    }

    /// Deliver `event`; dropped silently when no sink is installed.
    pub fn emit(&self, event: ShellEvent) {
        match self.sink.try_borrow_mut() {
            Ok(mut slot) => {
                if let Some(sink) = slot.as_mut() {
                    sink(event);
                }
            }
            Err(_) => warn!(?event, "event emitted from inside the sink; dropped"),
        }
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed = self.sink.try_borrow().map(|s| s.is_some()).unwrap_or(true);
        f.debug_struct("Emitter").field("installed", &installed).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tag_and_camel_case() {
        let ev = ShellEvent::OpenDialogResult {
            callback_id: "cb-1".to_owned(),
            paths: vec!["C:\\a.txt".to_owned()],
        };
        let json: serde_json::Value =
            serde_json::from_str(&ev.to_json().expect("serialize")).expect("parse");
        assert_eq!(json["event"], "openDialogResult");
        assert_eq!(json["callbackId"], "cb-1");
        assert_eq!(json["paths"][0], "C:\\a.txt");
    }

    #[test]
    fn closed_event_shape() {
        let json = ShellEvent::Closed { hidden: true }.to_json().expect("serialize");
        assert_eq!(json, r#"{"event":"closed","hidden":true}"#);
    }

    #[test]
    fn emitter_delivers_to_installed_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::default();
        emitter.emit(ShellEvent::Closed { hidden: false });

        let sink_seen = Rc::clone(&seen);
        emitter.set(Box::new(move |ev| sink_seen.borrow_mut().push(ev)));
        emitter.clone().emit(ShellEvent::Closed { hidden: true });

        assert_eq!(*seen.borrow(), vec![ShellEvent::Closed { hidden: true }]);

        emitter.clear();
        emitter.emit(ShellEvent::Closed { hidden: false });
        assert_eq!(seen.borrow().len(), 1);
    }
}
