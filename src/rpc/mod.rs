//! Connection to the editor's RPC socket
//!
//! A thin owner around an `nvim-rs` [`Neovim`] handle and the task that runs
//! its I/O loop. Every call is forwarded as-is; errors come back as the
//! library's [`CallError`](nvim_rs::error::CallError).

mod handler;

use std::path::Path;

use nvim_rs::compat::tokio::Compat;
use nvim_rs::create::tokio as create;
use nvim_rs::error::LoopError;
use nvim_rs::{Neovim, Value};
use tokio::io::WriteHalf;
use tokio::net::UnixStream;
use tokio::task::JoinHandle;

use crate::error::{NvimAgentError, Result};
use crate::types::cursor::CursorPosition;
use crate::types::identifiers::SessionId;
use crate::types::mode::Mode;

pub use handler::NotificationLogger;

/// Write half of the socket as `nvim-rs` sees it
pub type Writer = Compat<WriteHalf<UnixStream>>;

/// Attached RPC client
pub struct NvimClient {
    session_id: SessionId,
    nvim: Neovim<Writer>,
    io_task: Option<JoinHandle<std::result::Result<(), Box<LoopError>>>>,
}

impl NvimClient {
    /// Attach to an editor listening on `socket_path`
    ///
    /// # Errors
    /// Returns the I/O error if the socket refuses the connection
    pub async fn connect(session_id: SessionId, socket_path: &Path) -> std::io::Result<Self> {
        let handler = NotificationLogger::new(session_id.clone());
        let (nvim, io_task) = create::new_path(socket_path, handler).await?;
        log::debug!(
            "[{}] attached to {}",
            session_id.short(),
            socket_path.display()
        );
        Ok(Self {
            session_id,
            nvim,
            io_task: Some(io_task),
        })
    }

    /// Underlying `nvim-rs` handle, for calls this wrapper does not cover
    #[must_use]
    pub fn api(&self) -> &Neovim<Writer> {
        &self.nvim
    }

    /// Translate vim notation with the editor's own parser, then feed it
    ///
    /// Mirrors `nvim_feedkeys(nvim_replace_termcodes(keys, true, false, true), "n", false)`.
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn feed_keys(&self, keys: &str) -> Result<()> {
        let raw = self.nvim.replace_termcodes(keys, true, false, true).await?;
        self.nvim.feedkeys(&raw, "n", false).await?;
        Ok(())
    }

    /// Run an ex command
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn command(&self, command: &str) -> Result<()> {
        self.nvim.command(command).await?;
        Ok(())
    }

    /// Current mode tag
    ///
    /// # Errors
    /// Returns the RPC error, or an unexpected-reply error if the answer has no `mode`
    pub async fn mode(&self) -> Result<Mode> {
        let reply = self.nvim.get_mode().await?;
        mode_from_reply(&reply)
    }

    /// Cursor of the current window
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn cursor(&self) -> Result<CursorPosition> {
        let window = self.nvim.get_current_win().await?;
        let raw = window.get_cursor().await?;
        CursorPosition::from_rpc(raw)
    }

    /// All lines of the current buffer
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn lines(&self) -> Result<Vec<String>> {
        let buffer = self.nvim.get_current_buf().await?;
        Ok(buffer.get_lines(0, -1, false).await?)
    }

    /// Replace every line of the current buffer
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn set_lines(&self, lines: Vec<String>) -> Result<()> {
        let buffer = self.nvim.get_current_buf().await?;
        buffer.set_lines(0, -1, false, lines).await?;
        Ok(())
    }

    /// Ask the editor to quit, giving up after `grace`
    ///
    /// The editor usually exits before answering, so a dropped connection or
    /// timeout here is expected and only logged.
    pub async fn quit(&self, grace: std::time::Duration) {
        match tokio::time::timeout(grace, self.nvim.command("qa!")).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::trace!("[{}] qa! ended with: {e}", self.session_id.short()),
            Err(_) => log::trace!("[{}] qa! got no reply", self.session_id.short()),
        }
    }

    /// Stop the I/O loop
    pub fn disconnect(&mut self) {
        if let Some(task) = self.io_task.take() {
            task.abort();
            log::debug!("[{}] detached", self.session_id.short());
        }
    }
}

impl std::fmt::Debug for NvimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NvimClient")
            .field("session_id", &self.session_id)
            .field("connected", &self.io_task.is_some())
            .finish()
    }
}

impl Drop for NvimClient {
    fn drop(&mut self) {
        if let Some(task) = self.io_task.take() {
            task.abort();
        }
    }
}

/// Pull the `mode` entry out of an `nvim_get_mode()` dictionary
///
/// # Errors
/// Returns an unexpected-reply error if there is no string `mode` key
pub fn mode_from_reply(reply: &[(Value, Value)]) -> Result<Mode> {
    reply
        .iter()
        .find(|(key, _)| key.as_str() == Some("mode"))
        .and_then(|(_, value)| value.as_str())
        .map(Mode::from)
        .ok_or_else(|| {
            NvimAgentError::unexpected_reply("nvim_get_mode reply has no string 'mode' entry")
        })
}
