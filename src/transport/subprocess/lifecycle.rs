//! Lifecycle management for the editor process (spawn, shutdown, kill)

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use crate::error::{NvimAgentError, Result};
use crate::types::identifiers::SessionId;
use crate::types::options::SessionOptions;

use super::command::CommandBuilder;
use super::config::{MAX_SOCKET_PATH_LEN, SOCKET_FILE_NAME};
use super::reader::spawn_stderr_forwarder;
use super::transport::NvimProcess;

impl NvimProcess {
    /// Spawn `nvim --headless --listen <socket>`
    ///
    /// The socket is not guaranteed to exist when this returns; poll
    /// [`socket_ready`](Self::socket_ready) before connecting.
    ///
    /// # Errors
    /// Returns a startup error if `nvim` cannot be found, the socket path is
    /// unusable, or the process fails to spawn
    pub fn spawn(session_id: SessionId, options: &SessionOptions) -> Result<Self> {
        let nvim_path = match options.nvim_path {
            Some(ref path) => path.clone(),
            None => Self::find_nvim()?,
        };

        let (socket_path, socket_dir) = match options.socket_path {
            Some(ref path) => {
                validate_socket_path(path)?;
                (path.clone(), None)
            }
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("nvim-agent-")
                    .tempdir()
                    .map_err(|e| {
                        NvimAgentError::startup(format!("Failed to create socket directory: {e}"))
                    })?;
                let path = dir.path().join(SOCKET_FILE_NAME);
                validate_socket_path(&path)?;
                (path, Some(dir))
            }
        };

        let builder = CommandBuilder::new(&nvim_path, &socket_path, options);
        let mut cmd = builder.build();

        // stdin stays closed so the editor never reads it as buffer text.
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            if let Some(ref cwd) = options.cwd
                && !cwd.exists()
            {
                return NvimAgentError::startup(format!(
                    "Working directory does not exist: {}",
                    cwd.display()
                ));
            }
            NvimAgentError::startup(format!("Failed to start {}: {e}", nvim_path.display()))
        })?;

        log::debug!(
            "[{}] spawned {} (pid {:?}) listening on {}",
            session_id.short(),
            nvim_path.display(),
            child.id(),
            socket_path.display()
        );

        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| spawn_stderr_forwarder(session_id.clone(), stderr));

        Ok(Self {
            session_id,
            nvim_path,
            socket_path,
            socket_dir,
            child: Some(child),
            stderr_task,
            shutdown_timeout: options.shutdown_timeout,
        })
    }

    /// Exit status if the editor has already exited
    ///
    /// # Errors
    /// Returns error if the OS cannot be queried
    pub fn exit_status(&mut self) -> Result<Option<ExitStatus>> {
        match self.child.as_mut() {
            Some(child) => Ok(child.try_wait()?),
            None => Ok(None),
        }
    }

    /// Whether the child is still owned and running
    pub fn is_running(&mut self) -> bool {
        matches!(self.exit_status(), Ok(None)) && self.child.is_some()
    }

    /// Wait for the editor to exit, killing it after the shutdown timeout
    ///
    /// # Errors
    /// Returns error if waiting on the child fails
    pub async fn shutdown(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            match tokio::time::timeout(self.shutdown_timeout, child.wait()).await {
                Ok(Ok(status)) => {
                    log::debug!("[{}] nvim exited: {status}", self.session_id.short());
                }
                Ok(Err(e)) => {
                    self.finish();
                    return Err(NvimAgentError::Io(e));
                }
                Err(_) => {
                    log::warn!(
                        "[{}] nvim did not exit within {:?}, killing it",
                        self.session_id.short(),
                        self.shutdown_timeout
                    );
                    if let Err(e) = child.kill().await {
                        log::warn!("[{}] failed to kill nvim: {e}", self.session_id.short());
                    }
                }
            }
        }

        self.finish();
        Ok(())
    }

    /// Kill the editor immediately and reap it
    pub async fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                log::warn!("[{}] failed to kill nvim: {e}", self.session_id.short());
            } else {
                log::debug!("[{}] nvim killed", self.session_id.short());
            }
        }
        self.finish();
    }

    /// Stop the stderr task and remove the socket directory or socket file
    fn finish(&mut self) {
        if let Some(task) = self.stderr_task.take() {
            task.abort();
        }
        if let Some(dir) = self.socket_dir.take() {
            if let Err(e) = dir.close() {
                log::warn!(
                    "[{}] failed to remove socket directory: {e}",
                    self.session_id.short()
                );
            }
        } else {
            self.remove_socket_file();
        }
    }

    /// Remove a caller-supplied socket left behind by a killed editor
    ///
    /// `spawn` refuses paths that already exist, so a file here was created
    /// by this editor.
    fn remove_socket_file(&self) {
        match std::fs::remove_file(&self.socket_path) {
            Ok(()) => log::debug!(
                "[{}] removed stale socket {}",
                self.session_id.short(),
                self.socket_path.display()
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "[{}] failed to remove socket {}: {e}",
                self.session_id.short(),
                self.socket_path.display()
            ),
        }
    }

    /// Handle Drop cleanup
    pub(super) fn drop_impl(&mut self) {
        if let Some(task) = self.stderr_task.take() {
            task.abort();
        }

        // SIGKILL; tokio reaps the orphan in the background.
        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
        }

        if self.socket_dir.is_none() {
            self.remove_socket_file();
        }
    }
}

/// Reject socket paths the editor could never listen on
fn validate_socket_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(NvimAgentError::startup("Socket path is empty"));
    }

    if path.as_os_str().len() > MAX_SOCKET_PATH_LEN {
        return Err(NvimAgentError::startup(format!(
            "Socket path is longer than {MAX_SOCKET_PATH_LEN} bytes: {}",
            path.display()
        )));
    }

    if path.exists() {
        return Err(NvimAgentError::startup(format!(
            "Socket path already exists: {}",
            path.display()
        )));
    }

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    if !parent.is_dir() {
        return Err(NvimAgentError::startup(format!(
            "Socket directory does not exist: {}",
            parent.display()
        )));
    }

    Ok(())
}
