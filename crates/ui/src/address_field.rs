//! Address field component.

use tracing::debug;

/// Default width of the address field, in columns.
pub const DEFAULT_COLUMNS: usize = 100;

/// Single-line text input holding the current address.
pub struct AddressField {
    /// Text content.
    text: String,
    /// Preferred width in columns.
    columns: usize,
    /// Cursor position (byte offset).
    cursor: usize,
    /// Selection range (byte offsets).
    selection: Option<(usize, usize)>,
}

impl AddressField {
    /// Create an address field showing `text`.
    pub fn new(text: &str, columns: usize) -> Self {
        Self {
            text: text.to_string(),
            columns,
            cursor: text.len(),
            selection: None,
        }
    }

    /// Get the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, e.g. after the browser navigated.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.selection = None;
    }

    /// Get the preferred width in columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get selection.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Select the whole text.
    pub fn select_all(&mut self) {
        self.selection = Some((0, self.text.len()));
        self.cursor = self.text.len();
    }

    /// Handle key input.
    pub fn on_key(&mut self, key: Key) -> Option<AddressFieldAction> {
        match key {
            Key::Char(c) => {
                self.delete_selection();
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                None
            }
            Key::Backspace => {
                if !self.delete_selection() {
                    if let Some(prev) = self.prev_boundary() {
                        self.text.replace_range(prev..self.cursor, "");
                        self.cursor = prev;
                    }
                }
                None
            }
            Key::Delete => {
                if !self.delete_selection() {
                    if let Some(next) = self.next_boundary() {
                        self.text.replace_range(self.cursor..next, "");
                    }
                }
                None
            }
            Key::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                self.selection = None;
                None
            }
            Key::Right => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                self.selection = None;
                None
            }
            Key::Home => {
                self.cursor = 0;
                self.selection = None;
                None
            }
            Key::End => {
                self.cursor = self.text.len();
                self.selection = None;
                None
            }
            Key::SelectAll => {
                self.select_all();
                None
            }
            Key::Enter => {
                debug!(address = %self.text, "Address submitted");
                Some(AddressFieldAction::Submit(self.text.clone()))
            }
            Key::Tab => Some(AddressFieldAction::FocusNext { forward: true }),
            Key::BackTab => Some(AddressFieldAction::FocusNext { forward: false }),
        }
    }

    /// Remove the selected text. Returns whether anything was selected.
    fn delete_selection(&mut self) -> bool {
        match self.selection.take() {
            Some((start, end)) => {
                self.text.replace_range(start..end, "");
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

impl Default for AddressField {
    fn default() -> Self {
        Self::new("", DEFAULT_COLUMNS)
    }
}

/// Key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    SelectAll,
    Enter,
    Tab,
    BackTab,
}

/// Address field action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressFieldAction {
    /// Load the contained address.
    Submit(String),
    /// Move keyboard focus to the neighbouring component.
    FocusNext { forward: bool },
}
