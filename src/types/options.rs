//! Session options and configuration
//!
//! This module contains the options used to start an editor session,
//! including a builder and environment-variable overrides.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{NvimAgentError, Result};

/// Default time allowed for the editor to create its socket (5 seconds)
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time allowed for the editor to exit before it is killed (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variable naming the `nvim` executable
pub const ENV_NVIM_PATH: &str = "NVIM_AGENT_NVIM";

/// Environment variable overriding the startup timeout, in milliseconds
pub const ENV_STARTUP_TIMEOUT_MS: &str = "NVIM_AGENT_STARTUP_TIMEOUT_MS";

// ============================================================================
// Session Options
// ============================================================================

/// Options for starting an [`NvimSession`](crate::NvimSession)
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Path to the `nvim` executable (searched on PATH if `None`)
    pub nvim_path: Option<PathBuf>,
    /// Socket path for `--listen` (a private temp dir is used if `None`)
    pub socket_path: Option<PathBuf>,
    /// Lines loaded into the buffer at startup; empty means a single empty line
    pub initial_content: Vec<String>,
    /// How long to wait for the socket to appear
    pub startup_timeout: Duration,
    /// How long to wait for the editor to exit on close
    pub shutdown_timeout: Duration,
    /// Extra command-line flags, filtered against an allowlist
    pub extra_args: Vec<(String, Option<String>)>,
    /// Extra environment variables for the editor process
    pub env: HashMap<String, String>,
    /// Working directory for the editor process
    pub cwd: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            nvim_path: None,
            socket_path: None,
            initial_content: Vec::new(),
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            extra_args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }
}

impl SessionOptions {
    /// Create a new builder for `SessionOptions`
    #[must_use]
    pub fn builder() -> SessionOptionsBuilder {
        SessionOptionsBuilder::default()
    }

    /// Default options with overrides taken from the environment
    ///
    /// Reads [`ENV_NVIM_PATH`] and [`ENV_STARTUP_TIMEOUT_MS`].
    ///
    /// # Errors
    /// Returns error if the timeout variable is not a positive number
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(path) = std::env::var(ENV_NVIM_PATH)
            && !path.is_empty()
        {
            options.nvim_path = Some(PathBuf::from(path));
        }

        if let Ok(raw) = std::env::var(ENV_STARTUP_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                NvimAgentError::invalid_config(format!(
                    "{ENV_STARTUP_TIMEOUT_MS} must be a number of milliseconds, got '{raw}'"
                ))
            })?;
            if ms == 0 {
                return Err(NvimAgentError::invalid_config(format!(
                    "{ENV_STARTUP_TIMEOUT_MS} must be greater than zero"
                )));
            }
            options.startup_timeout = Duration::from_millis(ms);
        }

        Ok(options)
    }

    /// Lines to seed the buffer with, never empty
    #[must_use]
    pub fn seed_lines(&self) -> Vec<String> {
        if self.initial_content.is_empty() {
            vec![String::new()]
        } else {
            self.initial_content.clone()
        }
    }
}

// ============================================================================
// Builder for SessionOptions
// ============================================================================

/// Builder for `SessionOptions`
#[derive(Debug, Default)]
pub struct SessionOptionsBuilder {
    options: SessionOptions,
}

impl SessionOptionsBuilder {
    /// Start from existing options (e.g. [`SessionOptions::from_env`])
    #[must_use]
    pub fn from_options(options: SessionOptions) -> Self {
        Self { options }
    }

    /// Set the `nvim` executable
    #[must_use]
    pub fn nvim_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.nvim_path = Some(path.into());
        self
    }

    /// Set an explicit socket path
    #[must_use]
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.socket_path = Some(path.into());
        self
    }

    /// Set the initial buffer lines
    #[must_use]
    pub fn initial_content<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.initial_content = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial buffer from text, split on `\n`
    #[must_use]
    pub fn initial_text(mut self, text: &str) -> Self {
        self.options.initial_content = text.split('\n').map(str::to_string).collect();
        self
    }

    /// Set the startup timeout
    ///
    /// # Panics
    /// Panics if the timeout is zero
    #[must_use]
    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "startup_timeout must be non-zero");
        self.options.startup_timeout = timeout;
        self
    }

    /// Set the shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.options.shutdown_timeout = timeout;
        self
    }

    /// Add an extra command-line flag
    #[must_use]
    pub fn extra_arg(mut self, flag: impl Into<String>, value: Option<String>) -> Self {
        self.options.extra_args.push((flag.into(), value));
        self
    }

    /// Add an environment variable for the editor process
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.cwd = Some(path.into());
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> SessionOptions {
        self.options
    }
}
