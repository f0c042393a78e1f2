use serde::{Deserialize, Serialize};

/// A single checklist row.
///
/// While the checklist is in editing mode, `text` may be blank — that is how
/// the trailing draft row ("next row to fill in") is represented. Once
/// editing finishes, blank rows are dropped and the rest are trimmed, so a
/// finished checklist never contains leading/trailing whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Display text. Untrimmed while editing.
    pub text: String,
    /// Whether the row has been ticked off.
    pub checked: bool,
}

impl Entry {
    /// Create an unchecked entry with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
        }
    }

    /// True when the text is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
