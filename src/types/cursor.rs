//! Cursor position type

use serde::{Deserialize, Serialize};

use crate::error::{NvimAgentError, Result};

/// Cursor position as reported by `nvim_win_get_cursor`
///
/// `row` is 1-indexed, `col` is a 0-indexed byte offset into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CursorPosition {
    /// Line number, starting at 1
    pub row: usize,
    /// Byte column, starting at 0
    pub col: usize,
}

impl CursorPosition {
    /// Create a cursor position
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert the raw `(row, col)` pair returned over RPC
    ///
    /// # Errors
    /// Returns [`NvimAgentError::UnexpectedReply`] for negative values
    pub fn from_rpc((row, col): (i64, i64)) -> Result<Self> {
        let row = usize::try_from(row)
            .map_err(|_| NvimAgentError::unexpected_reply(format!("negative cursor row {row}")))?;
        let col = usize::try_from(col)
            .map_err(|_| NvimAgentError::unexpected_reply(format!("negative cursor col {col}")))?;
        Ok(Self { row, col })
    }
}

impl std::fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CursorPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}
