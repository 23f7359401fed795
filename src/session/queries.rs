//! Key input and state queries, all forwarded to the editor

use crate::error::{NvimAgentError, Result};
use crate::types::cursor::CursorPosition;
use crate::types::mode::Mode;
use crate::types::state::EditorState;

use super::NvimSession;

impl NvimSession {
    /// Type keys exactly as a user would
    ///
    /// Vim notation such as `<Esc>`, `<CR>` or `<C-w>` is translated by the
    /// editor itself. Keys are fed without remapping (`"n"` mode), so they
    /// act the same regardless of user mappings.
    ///
    /// - `"i"` enters insert mode
    /// - `"Hello<Esc>"` types text, then returns to normal mode
    /// - `"dd"` deletes the line (in normal mode)
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn type_keys(&self, keys: &str) -> Result<()> {
        log::trace!("[{}] keys: {keys:?}", self.id.short());
        self.client()?.feed_keys(keys).await
    }

    /// Run an ex command (without the leading `:`)
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn command(&self, command: &str) -> Result<()> {
        log::trace!("[{}] command: {command:?}", self.id.short());
        self.client()?.command(command).await
    }

    /// Current mode
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn get_mode(&self) -> Result<Mode> {
        self.client()?.mode().await
    }

    /// Cursor position: row 1-indexed, column 0-indexed
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn get_cursor_position(&self) -> Result<CursorPosition> {
        self.client()?.cursor().await
    }

    /// All buffer lines
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn get_buffer_content(&self) -> Result<Vec<String>> {
        self.client()?.lines().await
    }

    /// Replace all buffer lines without moving to normal mode
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn set_buffer_content<I, S>(&self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        self.client()?.set_lines(lines).await
    }

    /// Line `line_num`, 1-indexed
    ///
    /// # Errors
    /// Returns [`NvimAgentError::LineOutOfRange`] if the line does not exist
    pub async fn get_line(&self, line_num: usize) -> Result<String> {
        let mut lines = self.get_buffer_content().await?;
        let line_count = lines.len();
        if line_num == 0 || line_num > line_count {
            return Err(NvimAgentError::LineOutOfRange {
                line: line_num,
                line_count,
            });
        }
        Ok(lines.swap_remove(line_num - 1))
    }

    /// Line the cursor is on
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn get_current_line(&self) -> Result<String> {
        let cursor = self.get_cursor_position().await?;
        self.get_line(cursor.row).await
    }

    /// Buffer, cursor and mode in one snapshot
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn capture_state(&self) -> Result<EditorState> {
        let buffer_content = self.get_buffer_content().await?;
        let cursor = self.get_cursor_position().await?;
        let mode = self.get_mode().await?;
        Ok(EditorState::new(buffer_content, cursor, mode))
    }
}
