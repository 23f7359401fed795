//! Type definitions for nvim-agent
//!
//! - [`identifiers`] - Type-safe ID wrappers (`SessionId`)
//! - [`mode`] - Editor mode tag
//! - [`cursor`] - Cursor position
//! - [`state`] - Editor state snapshots
//! - [`options`] - Session configuration

pub mod cursor;
pub mod identifiers;
pub mod mode;
pub mod options;
pub mod state;

// Re-export commonly used types
pub use cursor::CursorPosition;
pub use identifiers::SessionId;
pub use mode::Mode;
pub use options::{SessionOptions, SessionOptionsBuilder};
pub use state::EditorState;
