// ── Dialog requests ───────────────────────────────────────────────────────────
//
// Pure-Rust descriptions of the open / save / message dialogs the application
// layer can ask for, plus the translation rules the Win32 backend needs
// (filter strings, button sets).  No Win32 imports; usable from any module.

/// Parameters for an "Open" dialog.
///
/// The macOS-flavoured flags (`resolves_aliases`, packages as directories) are
/// accepted for surface compatibility and have no effect on Windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenDialogRequest {
    pub title: String,
    /// Comma-separated filter entries, see [`parse_filters`].
    pub filters: String,
    pub default_filename: String,
    pub default_dir: String,
    pub allow_files: bool,
    pub allow_dirs: bool,
    pub allow_multiple: bool,
    pub show_hidden_files: bool,
    pub can_create_directories: bool,
    pub resolves_aliases: bool,
    pub treat_packages_as_directories: bool,
}

/// Parameters for a "Save As" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDialogRequest {
    pub title: String,
    pub filters: String,
    pub default_filename: String,
    pub default_dir: String,
    pub show_hidden_files: bool,
    pub can_create_directories: bool,
    pub treat_packages_as_directories: bool,
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// One row of the file-type drop-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Semicolon-separated glob patterns, e.g. `*.png;*.jpg`.
    pub patterns: String,
}

/// Parse `"Images|*.png;*.jpg,Text|*.txt"` into filter rows.
///
/// An entry without a `|` uses its patterns as the display name.  Blank
/// entries are skipped.
pub fn parse_filters(spec: &str) -> Vec<FileFilter> {
    spec.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let (name, patterns) = match entry.split_once('|') {
                Some((name, patterns)) => (name.trim(), patterns.trim()),
                None => (entry, entry),
            };
            (!patterns.is_empty()).then(|| FileFilter {
                name: (if name.is_empty() { patterns } else { name }).to_owned(),
                patterns: patterns.to_owned(),
            })
        })
        .collect()
}

/// Build the double-null-terminated UTF-16 filter string the common dialogs
/// expect: `"Display\0*.ext\0…\0\0"`.  An "All Files" row is always appended.
pub fn filter_string(spec: &str) -> Vec<u16> {
    let mut rows = parse_filters(spec);
    rows.push(FileFilter {
        name: "All Files (*.*)".to_owned(),
        patterns: "*.*".to_owned(),
    });

    let mut out = Vec::new();
    for row in &rows {
        out.extend(row.name.encode_utf16());
        out.push(0);
        out.extend(row.patterns.encode_utf16());
        out.push(0);
    }
    out.push(0);
    out
}

/// Split the buffer filled by a multi-select open dialog.
///
/// With `OFN_EXPLORER | OFN_ALLOWMULTISELECT` the buffer holds either one
/// full path, or a directory followed by bare file names, each NUL-separated
/// and the whole list terminated by an empty string.
pub fn split_multi_select(buf: &[u16]) -> Vec<String> {
    let parts: Vec<String> = buf
        .split(|&c| c == 0)
        .take_while(|part| !part.is_empty())
        .map(String::from_utf16_lossy)
        .collect();

    match parts.split_first() {
        None => Vec::new(),
        Some((only, [])) => vec![only.clone()],
        Some((dir, names)) => {
            let dir = dir.trim_end_matches('\\');
            names.iter().map(|n| format!("{dir}\\{n}")).collect()
        }
    }
}

// ── Message dialogs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Info,
    Warning,
    Error,
    Question,
}

impl MessageKind {
    /// Case-insensitive; unknown names are treated as `Info`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            "question" => Self::Question,
            _ => Self::Info,
        }
    }
}

/// The fixed button combinations a Win32 message box offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSet {
    Ok,
    OkCancel,
    YesNo,
    YesNoCancel,
}

/// A button as reported back by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Ok,
    Cancel,
    Yes,
    No,
}

impl ButtonSet {
    /// Pick the closest set for the caller's labels.
    pub fn for_labels(labels: &[String]) -> Self {
        match labels.len() {
            0 | 1 => Self::Ok,
            2 => {
                let yes_no = labels[0].eq_ignore_ascii_case("yes")
                    && labels[1].eq_ignore_ascii_case("no");
                if yes_no {
                    Self::YesNo
                } else {
                    Self::OkCancel
                }
            }
            _ => Self::YesNoCancel,
        }
    }

    fn buttons(self) -> &'static [DialogButton] {
        match self {
            Self::Ok => &[DialogButton::Ok],
            Self::OkCancel => &[DialogButton::Ok, DialogButton::Cancel],
            Self::YesNo => &[DialogButton::Yes, DialogButton::No],
            Self::YesNoCancel => &[DialogButton::Yes, DialogButton::No, DialogButton::Cancel],
        }
    }

    /// Slot of `button` within this set.
    pub fn position(self, button: DialogButton) -> Option<usize> {
        self.buttons().iter().position(|&b| b == button)
    }
}

/// Parameters for a message box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDialogRequest {
    pub kind: MessageKind,
    pub title: String,
    pub message: String,
    /// Custom icon name; accepted and ignored on Windows.
    pub icon: String,
    /// Non-empty button labels in display order (at most four are passed in).
    pub buttons: Vec<String>,
    pub default_button: Option<String>,
    pub cancel_button: Option<String>,
}

impl MessageDialogRequest {
    /// Keep only the non-empty labels.
    pub fn with_buttons<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buttons = labels
            .into_iter()
            .map(Into::into)
            .filter(|l: &String| !l.is_empty())
            .collect();
        self
    }

    pub fn button_set(&self) -> ButtonSet {
        ButtonSet::for_labels(&self.buttons)
    }

    /// Zero-based slot of the default button, if one is named.
    pub fn default_index(&self) -> Option<usize> {
        let wanted = self.default_button.as_deref()?;
        self.buttons.iter().position(|b| b == wanted)
    }

    /// Label the application layer sees for the pressed `button`.
    pub fn answer_label(&self, button: DialogButton) -> String {
        let slot = self.button_set().position(button);
        if let Some(label) = slot.and_then(|i| self.buttons.get(i)) {
            return label.clone();
        }
        if button == DialogButton::Cancel {
            if let Some(cancel) = &self.cancel_button {
                return cancel.clone();
            }
        }
        match button {
            DialogButton::Ok => "Ok",
            DialogButton::Cancel => "Cancel",
            DialogButton::Yes => "Yes",
            DialogButton::No => "No",
        }
        .to_owned()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn filters_with_and_without_names() {
        let rows = parse_filters("Images|*.png;*.jpg, *.txt ,,");
        assert_eq!(
            rows,
            vec![
                FileFilter {
                    name: "Images".to_owned(),
                    patterns: "*.png;*.jpg".to_owned()
                },
                FileFilter {
                    name: "*.txt".to_owned(),
                    patterns: "*.txt".to_owned()
                },
            ]
        );
    }

    #[test]
    fn filter_string_is_double_null_terminated() {
        let s = filter_string("Text|*.txt");
        assert_eq!(s, utf16("Text\0*.txt\0All Files (*.*)\0*.*\0\0"));
    }

    #[test]
    fn empty_filters_fall_back_to_all_files() {
        assert_eq!(filter_string(""), utf16("All Files (*.*)\0*.*\0\0"));
    }

    #[test]
    fn single_selection_is_a_full_path() {
        let buf = utf16("C:\\docs\\a.txt\0\0");
        assert_eq!(split_multi_select(&buf), vec!["C:\\docs\\a.txt".to_owned()]);
    }

    #[test]
    fn multi_selection_joins_directory_and_names() {
        let buf = utf16("C:\\docs\0a.txt\0b.txt\0\0");
        assert_eq!(
            split_multi_select(&buf),
            vec!["C:\\docs\\a.txt".to_owned(), "C:\\docs\\b.txt".to_owned()]
        );
    }

    #[test]
    fn empty_buffer_selects_nothing() {
        assert!(split_multi_select(&[0, 0]).is_empty());
    }

    #[test]
    fn button_sets_follow_labels() {
        let req = MessageDialogRequest::default().with_buttons(["Yes", "No", "", ""]);
        assert_eq!(req.button_set(), ButtonSet::YesNo);

        let req = MessageDialogRequest::default().with_buttons(["Save", "Discard"]);
        assert_eq!(req.button_set(), ButtonSet::OkCancel);

        let req = MessageDialogRequest::default().with_buttons(["A", "B", "C"]);
        assert_eq!(req.button_set(), ButtonSet::YesNoCancel);

        let req = MessageDialogRequest::default().with_buttons(Vec::<String>::new());
        assert_eq!(req.button_set(), ButtonSet::Ok);
    }

    #[test]
    fn answers_map_back_to_caller_labels() {
        let req = MessageDialogRequest::default().with_buttons(["Save", "Discard"]);
        assert_eq!(req.answer_label(DialogButton::Ok), "Save");
        assert_eq!(req.answer_label(DialogButton::Cancel), "Discard");

        let req = MessageDialogRequest::default().with_buttons(["Retry", "Skip", "Abort"]);
        assert_eq!(req.answer_label(DialogButton::No), "Skip");
        assert_eq!(req.answer_label(DialogButton::Cancel), "Abort");
    }

    #[test]
    fn unmatched_cancel_uses_cancel_label() {
        let req = MessageDialogRequest {
            cancel_button: Some("Dismiss".to_owned()),
            ..Default::default()
        }
        .with_buttons(["Got it"]);
        assert_eq!(req.answer_label(DialogButton::Ok), "Got it");
        assert_eq!(req.answer_label(DialogButton::Cancel), "Dismiss");
    }

    #[test]
    fn default_index_by_label() {
        let req = MessageDialogRequest {
            default_button: Some("No".to_owned()),
            ..Default::default()
        }
        .with_buttons(["Yes", "No"]);
        assert_eq!(req.default_index(), Some(1));
    }

    #[test]
    fn message_kind_names() {
        assert_eq!(MessageKind::from_name("Warning"), MessageKind::Warning);
        assert_eq!(MessageKind::from_name("error"), MessageKind::Error);
        assert_eq!(MessageKind::from_name("QUESTION"), MessageKind::Question);
        assert_eq!(MessageKind::from_name("info"), MessageKind::Info);
        assert_eq!(MessageKind::from_name("whatever"), MessageKind::Info);
    }
}
