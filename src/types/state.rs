//! Point-in-time snapshot of the editor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cursor::CursorPosition;
use super::mode::Mode;

/// Buffer, cursor and mode captured together after a query round-trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    /// Every line of the current buffer
    pub buffer_content: Vec<String>,
    /// Cursor in the current window
    pub cursor: CursorPosition,
    /// Mode at capture time
    pub mode: Mode,
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl EditorState {
    /// Build a snapshot stamped with the current time
    #[must_use]
    pub fn new(buffer_content: Vec<String>, cursor: CursorPosition, mode: Mode) -> Self {
        Self {
            buffer_content,
            cursor,
            mode,
            captured_at: Utc::now(),
        }
    }

    /// Number of lines in the buffer
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.buffer_content.len()
    }

    /// Line under the cursor, or `""` if the cursor row is out of range
    #[must_use]
    pub fn current_line(&self) -> &str {
        self.cursor
            .row
            .checked_sub(1)
            .and_then(|idx| self.buffer_content.get(idx))
            .map_or("", String::as_str)
    }

    /// Total characters across all lines, newlines excluded
    #[must_use]
    pub fn total_characters(&self) -> usize {
        self.buffer_content.iter().map(|l| l.chars().count()).sum()
    }

    /// A fresh buffer holds a single empty line
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer_content.len() == 1 && self.buffer_content[0].is_empty()
    }

    /// Buffer joined with `\n`
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer_content.join("\n")
    }
}
