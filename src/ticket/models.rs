use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BoardError;

/// Priority color of a ticket, one per swatch in the add modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketColor {
    Lightpink,
    Lightblue,
    Lightgreen,
    Black,
}

impl TicketColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketColor::Lightpink => "lightpink",
            TicketColor::Lightblue => "lightblue",
            TicketColor::Lightgreen => "lightgreen",
            TicketColor::Black => "black",
        }
    }

    /// Swatch order, left to right
    pub fn swatches() -> &'static [TicketColor] {
        &[
            TicketColor::Lightpink,
            TicketColor::Lightblue,
            TicketColor::Lightgreen,
            TicketColor::Black,
        ]
    }

    /// Position of this color in the swatch row
    pub fn index(&self) -> usize {
        Self::swatches()
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }

    /// RGB value of the named color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TicketColor::Lightpink => (0xFF, 0xB6, 0xC1),
            TicketColor::Lightblue => (0xAD, 0xD8, 0xE6),
            TicketColor::Lightgreen => (0x90, 0xEE, 0x90),
            TicketColor::Black => (0x00, 0x00, 0x00),
        }
    }

    /// Whether text on top of this color should be light
    pub fn is_dark(&self) -> bool {
        matches!(self, TicketColor::Black)
    }
}

impl Default for TicketColor {
    fn default() -> Self {
        Self::Lightpink
    }
}

impl fmt::Display for TicketColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a ticket's content may be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    pub fn toggled(self) -> Self {
        match self {
            LockState::Locked => LockState::Unlocked,
            LockState::Unlocked => LockState::Locked,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            LockState::Locked => "🔒",
            LockState::Unlocked => "🔓",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LockState::Locked => "locked",
            LockState::Unlocked => "unlocked",
        }
    }
}

impl Default for LockState {
    fn default() -> Self {
        Self::Locked
    }
}

/// Unique handle of a ticket on the board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short label shown on the card: `#` plus the first 8 characters
    pub fn label(&self) -> String {
        let short: String = self.0.chars().take(8).collect();
        format!("#{}", short)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ticket on the board
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: TicketId,
    color: TicketColor,
    content: String,
    lock: LockState,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn new(id: TicketId, color: TicketColor, content: impl Into<String>) -> Self {
        Self {
            id,
            color,
            content: content.into(),
            lock: LockState::Locked,
            created_at: Utc::now(),
        }
    }

    /// Fixed at creation
    pub fn color(&self) -> TicketColor {
        self.color
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lock(&self) -> LockState {
        self.lock
    }

    /// Editability is derived from the lock, so the two never disagree
    pub fn is_editable(&self) -> bool {
        self.lock == LockState::Unlocked
    }

    pub fn lock_icon(&self) -> &'static str {
        self.lock.icon()
    }

    /// Flip the lock and return the new state
    pub fn toggle_lock(&mut self) -> LockState {
        self.lock = self.lock.toggled();
        self.lock
    }

    /// Replace the content; rejected while locked
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), BoardError> {
        if !self.is_editable() {
            return Err(BoardError::TicketLocked(self.id.clone()));
        }
        self.content = content.into();
        Ok(())
    }
}
