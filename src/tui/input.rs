use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags, ModifierKeyCode,
};

use crate::config::SubmitKey;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode - navigating the board
    Normal,
    /// Add modal is open and owns the keyboard
    Modal,
    /// Editing the content of an unlocked ticket
    EditTicket,
}

/// Does this key event commit the add modal under the configured binding?
pub fn is_submit_key(submit: SubmitKey, key: &KeyEvent) -> bool {
    match submit {
        SubmitKey::Enter => {
            key.code == KeyCode::Enter && !key.modifiers.contains(KeyModifiers::SHIFT)
        }
        SubmitKey::ShiftEnter => {
            key.code == KeyCode::Enter && key.modifiers.contains(KeyModifiers::SHIFT)
        }
        SubmitKey::Shift => {
            key.kind == KeyEventKind::Press
                && matches!(
                    key.code,
                    KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift)
                )
        }
    }
}

/// Keyboard enhancement flags the commit key needs, if any
pub fn keyboard_enhancement_flags(submit: SubmitKey) -> Option<KeyboardEnhancementFlags> {
    match submit {
        SubmitKey::Enter => None,
        // Enough for Shift to be reported on Enter
        SubmitKey::ShiftEnter => Some(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES),
        // A bare Shift press is only reported when every key is an escape code.
        // Alternate keys keep shifted characters intact under that mode.
        SubmitKey::Shift => Some(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS,
        ),
    }
}

/// Fold Shift into the character when the terminal reported the base key,
/// e.g. `Char('f')` + SHIFT becomes `Char('F')` and `Char('1')` + SHIFT
/// becomes `Char('!')`. Symbols follow the US layout.
pub fn apply_shift(key: KeyEvent) -> KeyEvent {
    let KeyCode::Char(c) = key.code else {
        return key;
    };
    if !key.modifiers.contains(KeyModifiers::SHIFT) {
        return key;
    }
    KeyEvent {
        code: KeyCode::Char(shifted_char(c)),
        ..key
    }
}

fn shifted_char(c: char) -> char {
    if c.is_lowercase() {
        let mut upper = c.to_uppercase();
        return match (upper.next(), upper.next()) {
            (Some(u), None) => u,
            _ => c,
        };
    }
    match c {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '`' => '~',
        other => other,
    }
}

/// Single-line text buffer with a cursor.
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input pre-filled with `text`, cursor at the end
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.len();
        Self { buffer, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Jump to the start of the previous word (for Alt+Left)
    pub fn move_word_left(&mut self) {
        self.cursor = word_boundary_left(&self.buffer, self.cursor);
    }

    /// Jump past the next word (for Alt+Right)
    pub fn move_word_right(&mut self) {
        self.cursor = word_boundary_right(&self.buffer, self.cursor);
    }

    /// Text split at the cursor, for rendering a caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

/// Find the previous word boundary
fn word_boundary_left(s: &str, pos: usize) -> usize {
    let before: Vec<(usize, char)> = s[..pos].char_indices().collect();
    let mut i = before.len();
    // Skip whitespace/punctuation
    while i > 0 && !before[i - 1].1.is_alphanumeric() {
        i -= 1;
    }
    // Skip word characters
    while i > 0 && before[i - 1].1.is_alphanumeric() {
        i -= 1;
    }
    before.get(i).map(|(idx, _)| *idx).unwrap_or(pos)
}

/// Find the next word boundary
fn word_boundary_right(s: &str, pos: usize) -> usize {
    let mut chars = s[pos..].char_indices().peekable();
    // Skip current word characters
    while chars.next_if(|(_, c)| c.is_alphanumeric()).is_some() {}
    // Skip whitespace/punctuation
    while chars.next_if(|(_, c)| !c.is_alphanumeric()).is_some() {}
    chars.peek().map(|(i, _)| pos + i).unwrap_or(s.len())
}
