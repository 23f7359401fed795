//! Command and history record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NvimAgentError;
use crate::types::state::EditorState;

/// Keystrokes to run, with a human description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCommand {
    /// Vim keystrokes, e.g. `"iHello<Esc>"`, `"dd"`, `"gg"`
    pub keystrokes: String,
    /// What the keystrokes are meant to do
    #[serde(default)]
    pub description: String,
}

impl EditCommand {
    /// Create a command
    pub fn new(keystrokes: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            keystrokes: keystrokes.into(),
            description: description.into(),
        }
    }

    /// Description if set, otherwise the keystrokes
    #[must_use]
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.keystrokes
        } else {
            &self.description
        }
    }
}

impl From<&str> for EditCommand {
    fn from(keystrokes: &str) -> Self {
        Self::new(keystrokes, "")
    }
}

impl From<String> for EditCommand {
    fn from(keystrokes: String) -> Self {
        Self::new(keystrokes, "")
    }
}

impl From<(&str, &str)> for EditCommand {
    fn from((keystrokes, description): (&str, &str)) -> Self {
        Self::new(keystrokes, description)
    }
}

/// One executed command and the state it left behind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The command as submitted
    pub command: EditCommand,
    /// Editor state right after the keystrokes were fed
    pub state: EditorState,
    /// When the command was executed
    pub executed_at: DateTime<Utc>,
}

impl CommandRecord {
    /// Status line for the command
    #[must_use]
    pub fn message(&self) -> String {
        format!("Executed: {}", self.command.label())
    }
}

/// The command that stopped a batch
#[derive(Debug)]
pub struct BatchFailure {
    /// Zero-based position of the failing command
    pub index: usize,
    /// The failing command
    pub command: EditCommand,
    /// Error it raised
    pub error: NvimAgentError,
}

/// Result of [`VimAgent::execute_commands`](super::VimAgent::execute_commands)
///
/// Batches are fail-fast without rollback: `records` holds one entry per
/// command that completed, and edits they made stay applied.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Records of the commands that completed, in order
    pub records: Vec<CommandRecord>,
    /// The command that stopped the batch, if any
    pub failure: Option<BatchFailure>,
}

impl BatchReport {
    /// Whether every command completed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of commands that completed
    #[must_use]
    pub fn completed(&self) -> usize {
        self.records.len()
    }

    /// State after the last completed command
    #[must_use]
    pub fn final_state(&self) -> Option<&EditorState> {
        self.records.last().map(|r| &r.state)
    }
}
