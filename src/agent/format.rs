//! Text rendering of editor state for a language model

use std::fmt::Write;

use crate::types::state::EditorState;

use super::commands::CommandRecord;
use super::helpers::{
    DEFAULT_LINES_AFTER, DEFAULT_LINES_BEFORE, context_window, insert_cursor_marker,
    suggestions_for,
};

/// Marker drawn at the cursor column
pub const CURSOR_MARKER: char = '│';

/// Marker in front of the cursor line
const CURSOR_LINE_PREFIX: &str = " ► ";

/// Prefix for every other line
const LINE_PREFIX: &str = "   ";

/// What to include in [`render_state`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Append a "SUGGESTED ACTIONS" section
    pub include_suggestions: bool,
    /// Suggestions shown at most
    pub max_suggestions: usize,
    /// Append the last N commands (0 disables the section)
    pub history_limit: usize,
    /// Lines shown above the cursor
    pub lines_before: usize,
    /// Lines shown below the cursor
    pub lines_after: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            include_suggestions: true,
            max_suggestions: 5,
            history_limit: 0,
            lines_before: DEFAULT_LINES_BEFORE,
            lines_after: DEFAULT_LINES_AFTER,
        }
    }
}

impl FormatOptions {
    /// Defaults plus the last `limit` commands
    #[must_use]
    pub fn with_history(limit: usize) -> Self {
        Self {
            history_limit: limit,
            ..Self::default()
        }
    }

    /// Defaults without the suggestions section
    #[must_use]
    pub fn without_suggestions() -> Self {
        Self {
            include_suggestions: false,
            ..Self::default()
        }
    }
}

/// Render `state` (and optionally recent `history`) as plain text
///
/// The output is deterministic for a given state; the capture timestamp is
/// not included.
#[must_use]
pub fn render_state(
    state: &EditorState,
    history: &[CommandRecord],
    options: &FormatOptions,
) -> String {
    let context = context_window(state, options.lines_before, options.lines_after);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "=== VIM EDITOR STATE ===");
    let _ = writeln!(out, "Mode: {} ({})", state.mode, state.mode.describe());
    let _ = writeln!(
        out,
        "Cursor: Line {}, Column {}",
        state.cursor.row, state.cursor.col
    );
    let _ = writeln!(out, "Total Lines: {}", state.line_count());
    let _ = writeln!(out, "Total Characters: {}", state.total_characters());
    out.push('\n');

    let _ = writeln!(out, "=== BUFFER CONTEXT ===");
    for line in &context.lines {
        let (prefix, content) = match line.cursor_column {
            Some(col) if line.is_cursor_line => (
                CURSOR_LINE_PREFIX,
                insert_cursor_marker(&line.content, col, CURSOR_MARKER),
            ),
            _ => (LINE_PREFIX, line.content.clone()),
        };
        let _ = writeln!(out, "{prefix}{:3}: {content}", line.line_number);
    }

    if options.history_limit > 0 && !history.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "=== RECENT COMMANDS ===");
        let skip = history.len().saturating_sub(options.history_limit);
        for (idx, record) in history.iter().enumerate().skip(skip) {
            let description = match record.command.description.as_str() {
                "" => String::new(),
                text => format!(" - {text}"),
            };
            let _ = writeln!(
                out,
                "  {:2}. {:15}{description} -> mode {}, cursor {}",
                idx + 1,
                record.command.keystrokes,
                record.state.mode,
                record.state.cursor
            );
        }
    }

    if options.include_suggestions {
        let suggestions = suggestions_for(&state.mode);
        if !suggestions.is_empty() {
            out.push('\n');
            let _ = writeln!(out, "=== SUGGESTED ACTIONS ===");
            for suggestion in suggestions.iter().take(options.max_suggestions) {
                let _ = writeln!(out, "  • {suggestion}");
            }
        }
    }

    while out.ends_with('\n') {
        out.pop();
    }
    out
}
