//! Error types for nvim-agent

use nvim_rs::error::CallError;
use thiserror::Error;

/// Main error type for nvim-agent
#[derive(Error, Debug)]
pub enum NvimAgentError {
    /// `nvim` executable not found or not installed
    #[error("Neovim not found: {0}")]
    NvimNotFound(String),

    /// The editor process could not be started or attached to
    #[error("Startup error: {0}")]
    Startup(String),

    /// Timed out waiting for the editor
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A state-verification helper found a mismatch
    #[error("Assertion failed: {what}: expected {expected}, got {actual}")]
    Assertion {
        /// What was checked (mode, cursor, line N)
        what: String,
        /// Expected value, already formatted
        expected: String,
        /// Actual value reported by the editor
        actual: String,
    },

    /// Error raised by the RPC layer, passed through unmodified
    #[error(transparent)]
    Rpc(#[from] Box<CallError>),

    /// The editor answered with a value of the wrong shape
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    /// Requested line does not exist in the buffer
    #[error("Line {line} out of range (buffer has {line_count} lines)")]
    LineOutOfRange {
        /// 1-indexed line that was requested
        line: usize,
        /// Number of lines in the buffer
        line_count: usize,
    },

    /// Session has been closed
    #[error("Editor session is not active")]
    SessionClosed,

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decode error
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),
}

/// Result type alias for nvim-agent operations
pub type Result<T> = std::result::Result<T, NvimAgentError>;

impl NvimAgentError {
    /// Create an nvim-not-found error
    #[must_use]
    pub fn nvim_not_found() -> Self {
        Self::NvimNotFound(
            "nvim not found. Install Neovim (0.9 or later) and make sure it is on PATH,\n\
             or set NVIM_AGENT_NVIM to the executable"
                .to_string(),
        )
    }

    /// Create a startup error
    pub fn startup(msg: impl Into<String>) -> Self {
        Self::Startup(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an assertion error from anything displayable
    pub fn assertion(
        what: impl Into<String>,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::Assertion {
            what: what.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an unexpected reply error
    pub fn unexpected_reply(msg: impl Into<String>) -> Self {
        Self::UnexpectedReply(msg.into())
    }

    /// Whether this error was raised while bringing a session up
    #[must_use]
    pub const fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::NvimNotFound(_) | Self::Startup(_) | Self::Timeout(_) | Self::InvalidConfig(_)
        )
    }

    /// Whether this error is a failed state assertion
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }
}
