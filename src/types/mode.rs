//! Editor mode as reported by `nvim_get_mode()`

use serde::{Deserialize, Serialize};

/// Short mode tag mirroring what Neovim reports (`"n"`, `"i"`, `"v"`, `"no"`, ...)
///
/// This is only ever a copy of the last answer from the editor. It is never
/// used to track state locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mode(String);

impl Mode {
    /// Normal mode tag
    pub const NORMAL: &'static str = "n";
    /// Insert mode tag
    pub const INSERT: &'static str = "i";
    /// Characterwise visual mode tag
    pub const VISUAL: &'static str = "v";
    /// Linewise visual mode tag
    pub const VISUAL_LINE: &'static str = "V";
    /// Blockwise visual mode tag (`CTRL-V`)
    pub const VISUAL_BLOCK: &'static str = "\u{16}";
    /// Replace mode tag
    pub const REPLACE: &'static str = "R";
    /// Command-line mode tag
    pub const COMMAND_LINE: &'static str = "c";

    /// Wrap a raw mode tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Get the raw tag
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Plain normal mode (not operator-pending)
    #[must_use]
    pub fn is_normal(&self) -> bool {
        self.0 == Self::NORMAL
    }

    /// Insert mode
    #[must_use]
    pub fn is_insert(&self) -> bool {
        self.0 == Self::INSERT
    }

    /// Any of the three visual modes
    #[must_use]
    pub fn is_visual(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::VISUAL | Self::VISUAL_LINE | Self::VISUAL_BLOCK
        )
    }

    /// Human-readable name, falling back to the raw tag
    #[must_use]
    pub fn describe(&self) -> &str {
        match self.0.as_str() {
            Self::NORMAL => "normal",
            Self::INSERT => "insert",
            Self::VISUAL => "visual",
            Self::VISUAL_LINE => "visual line",
            Self::VISUAL_BLOCK => "visual block",
            Self::REPLACE => "replace",
            Self::COMMAND_LINE => "command-line",
            "no" => "operator-pending",
            other => other,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Mode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for Mode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Mode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
