//! State verification helpers

use crate::error::{NvimAgentError, Result};
use crate::types::cursor::CursorPosition;

use super::NvimSession;

impl NvimSession {
    /// Fail unless the editor is in `expected` mode
    ///
    /// # Errors
    /// Returns [`NvimAgentError::Assertion`] on mismatch, or the RPC error
    pub async fn assert_mode(&self, expected: &str) -> Result<()> {
        let actual = self.get_mode().await?;
        if actual != expected {
            return Err(NvimAgentError::assertion(
                "mode",
                format!("'{expected}'"),
                format!("'{actual}'"),
            ));
        }
        Ok(())
    }

    /// Fail unless the cursor is at (`row`, `col`)
    ///
    /// # Errors
    /// Returns [`NvimAgentError::Assertion`] on mismatch, or the RPC error
    pub async fn assert_cursor_at(&self, row: usize, col: usize) -> Result<()> {
        let expected = CursorPosition::new(row, col);
        let actual = self.get_cursor_position().await?;
        if actual != expected {
            return Err(NvimAgentError::assertion("cursor", expected, actual));
        }
        Ok(())
    }

    /// Fail unless line `line_num` (1-indexed) reads `expected`
    ///
    /// # Errors
    /// Returns [`NvimAgentError::Assertion`] on mismatch, or
    /// [`NvimAgentError::LineOutOfRange`] if the line does not exist
    pub async fn assert_line_content(&self, line_num: usize, expected: &str) -> Result<()> {
        let actual = self.get_line(line_num).await?;
        if actual != expected {
            return Err(NvimAgentError::assertion(
                format!("line {line_num}"),
                format!("'{expected}'"),
                format!("'{actual}'"),
            ));
        }
        Ok(())
    }

    /// Fail unless the whole buffer equals `expected`
    ///
    /// # Errors
    /// Returns [`NvimAgentError::Assertion`] on mismatch, or the RPC error
    pub async fn assert_buffer_content(&self, expected: &[&str]) -> Result<()> {
        let actual = self.get_buffer_content().await?;
        if actual != expected {
            return Err(NvimAgentError::assertion(
                "buffer",
                format!("{expected:?}"),
                format!("{actual:?}"),
            ));
        }
        Ok(())
    }
}
