//! The headless editor process

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::Child;
use tokio::task::JoinHandle;

use crate::error::{NvimAgentError, Result};
use crate::types::identifiers::SessionId;

/// One `nvim --headless --listen` child process and its socket
///
/// The child is spawned with `kill_on_drop`, and the socket directory (when
/// this process created it) is removed when the value is dropped.
pub struct NvimProcess {
    pub(super) session_id: SessionId,
    pub(super) nvim_path: PathBuf,
    pub(super) socket_path: PathBuf,
    pub(super) socket_dir: Option<TempDir>,
    pub(super) child: Option<Child>,
    pub(super) stderr_task: Option<JoinHandle<()>>,
    pub(super) shutdown_timeout: Duration,
}

impl NvimProcess {
    /// Find the `nvim` binary
    ///
    /// # Errors
    /// Returns error if `nvim` cannot be found on PATH or in common locations
    pub fn find_nvim() -> Result<PathBuf> {
        if let Ok(path) = which::which("nvim") {
            return Ok(path);
        }

        let home = env::var("HOME").unwrap_or_else(|_| String::from("/root"));
        let locations = vec![
            PathBuf::from("/usr/local/bin/nvim"),
            PathBuf::from("/opt/homebrew/bin/nvim"),
            PathBuf::from("/snap/bin/nvim"),
            PathBuf::from(home.clone()).join(".local/bin/nvim"),
            PathBuf::from(home).join(".nix-profile/bin/nvim"),
        ];

        for path in locations {
            if path.exists() && path.is_file() {
                return Ok(path);
            }
        }

        Err(NvimAgentError::nvim_not_found())
    }

    /// Session this process belongs to
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Executable that was launched
    #[must_use]
    pub fn nvim_path(&self) -> &Path {
        &self.nvim_path
    }

    /// Socket the editor listens on
    #[must_use]
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// OS process id, while the child is still owned
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    /// Whether the socket file has been created yet
    #[must_use]
    pub fn socket_ready(&self) -> bool {
        self.socket_path.exists()
    }
}

impl std::fmt::Debug for NvimProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NvimProcess")
            .field("session_id", &self.session_id)
            .field("nvim_path", &self.nvim_path)
            .field("socket_path", &self.socket_path)
            .field("pid", &self.pid())
            .field("owns_socket_dir", &self.socket_dir.is_some())
            .finish()
    }
}

impl Drop for NvimProcess {
    fn drop(&mut self) {
        self.drop_impl();
    }
}
