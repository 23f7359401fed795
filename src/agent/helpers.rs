//! Pure views over editor snapshots
//!
//! Everything here works on an [`EditorState`] that was already captured, so
//! it can be exercised without an editor.

use serde::Serialize;

use crate::types::cursor::CursorPosition;
use crate::types::mode::Mode;
use crate::types::state::EditorState;

use super::commands::CommandRecord;

/// Lines shown above the cursor by default
pub const DEFAULT_LINES_BEFORE: usize = 3;

/// Lines shown below the cursor by default
pub const DEFAULT_LINES_AFTER: usize = 3;

/// Counts and positions describing the buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferSummary {
    /// Number of lines
    pub line_count: usize,
    /// Current mode
    pub mode: Mode,
    /// Cursor position
    pub cursor: CursorPosition,
    /// Line under the cursor
    pub current_line_content: String,
    /// Full buffer
    pub buffer_content: Vec<String>,
    /// Buffer holds one empty line
    pub is_empty: bool,
    /// Characters across all lines
    pub total_characters: usize,
}

/// One line of a [`ContextWindow`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    /// 1-indexed line number
    pub line_number: usize,
    /// Line text
    pub content: String,
    /// Whether the cursor is on this line
    pub is_cursor_line: bool,
    /// Cursor column, only on the cursor line
    pub cursor_column: Option<usize>,
}

/// Lines around the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    /// Cursor position
    pub cursor: CursorPosition,
    /// Current mode
    pub mode: Mode,
    /// Lines in the window, top to bottom
    pub lines: Vec<ContextLine>,
    /// First line number shown
    pub window_start: usize,
    /// Last line number shown
    pub window_end: usize,
    /// Lines in the whole buffer
    pub total_lines: usize,
}

/// Overview of an agent's editing session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    /// Commands executed so far
    pub total_commands: usize,
    /// State right now
    pub current_state: EditorState,
    /// Every executed command, oldest first
    pub command_history: Vec<CommandRecord>,
    /// Snapshots recorded, including the initial one
    pub state_changes: usize,
    /// Milliseconds since the first snapshot
    pub session_duration_ms: i64,
}

/// Summarize a snapshot
#[must_use]
pub fn buffer_summary(state: &EditorState) -> BufferSummary {
    BufferSummary {
        line_count: state.line_count(),
        mode: state.mode.clone(),
        cursor: state.cursor,
        current_line_content: state.current_line().to_string(),
        buffer_content: state.buffer_content.clone(),
        is_empty: state.is_empty(),
        total_characters: state.total_characters(),
    }
}

/// Cut a window of `before` and `after` lines around the cursor
#[must_use]
pub fn context_window(state: &EditorState, before: usize, after: usize) -> ContextWindow {
    let total_lines = state.line_count();
    let cursor_row = state.cursor.row;

    let window_start = cursor_row.saturating_sub(before).max(1);
    let window_end = cursor_row.saturating_add(after).min(total_lines);

    let lines = (window_start..=window_end)
        .map(|line_number| {
            let is_cursor_line = line_number == cursor_row;
            ContextLine {
                line_number,
                content: state
                    .buffer_content
                    .get(line_number - 1)
                    .cloned()
                    .unwrap_or_default(),
                is_cursor_line,
                cursor_column: is_cursor_line.then_some(state.cursor.col),
            }
        })
        .collect();

    ContextWindow {
        cursor: state.cursor,
        mode: state.mode.clone(),
        lines,
        window_start,
        window_end,
        total_lines,
    }
}

/// Suggested next actions for a mode, most useful first
#[must_use]
pub fn suggestions_for(mode: &Mode) -> &'static [&'static str] {
    const NORMAL: &[&str] = &[
        "i - Enter insert mode at cursor",
        "A - Enter insert mode at end of line",
        "o - Open new line below and enter insert mode",
        "O - Open new line above and enter insert mode",
        "dd - Delete current line",
        "yy - Yank (copy) current line",
        "p - Paste below cursor",
        "gg - Go to first line",
        "G - Go to last line",
        "/text - Search for 'text'",
        ":%s/old/new/g - Replace all 'old' with 'new'",
    ];
    const INSERT: &[&str] = &[
        "<Esc> - Return to normal mode",
        "Type text to insert at cursor",
        "<Enter> - Create new line",
        "<BS> - Backspace",
        "<C-w> - Delete word backwards",
    ];
    const VISUAL: &[&str] = &[
        "d - Delete selection",
        "y - Yank (copy) selection",
        "<Esc> - Return to normal mode",
        "c - Change (delete and enter insert mode)",
    ];

    if mode.is_normal() {
        NORMAL
    } else if mode.is_insert() {
        INSERT
    } else if mode.is_visual() {
        VISUAL
    } else {
        &[]
    }
}

/// Insert `marker` into `line` at byte column `col`
///
/// Columns past the end append the marker. A column inside a multi-byte
/// character is moved back to the start of that character.
#[must_use]
pub fn insert_cursor_marker(line: &str, col: usize, marker: char) -> String {
    let mut out = String::with_capacity(line.len() + marker.len_utf8());
    if col >= line.len() {
        out.push_str(line);
        out.push(marker);
        return out;
    }

    let mut split = col;
    while !line.is_char_boundary(split) {
        split -= 1;
    }
    out.push_str(&line[..split]);
    out.push(marker);
    out.push_str(&line[split..]);
    out
}
