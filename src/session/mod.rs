//! `NvimSession`: one headless editor and one connection to it
//!
//! The session is the only owner of both the `nvim` child process and the RPC
//! connection. It keeps no copy of editable state: every query goes to the
//! editor, and every key sequence is handed over without local parsing.
//!
//! # Lifecycle
//!
//! ```text
//! start ──► spawn nvim ──► wait for socket ──► attach ──► seed buffer ──► ready
//!   │            │                │               │             │
//!   └────────────┴────── any failure: kill nvim, remove socket ─┘
//!
//! close ──► qa! ──► detach ──► wait (shutdown_timeout) ──► kill if still alive
//! drop  ──► abort I/O task ──► SIGKILL
//! ```
//!
//! # Example
//!
//! ```no_run
//! use nvim_agent::{NvimSession, SessionOptions};
//!
//! # async fn example() -> nvim_agent::Result<()> {
//! let mut session = NvimSession::start(SessionOptions::default()).await?;
//!
//! session.type_keys("iHello<Esc>").await?;
//! session.assert_mode("n").await?;
//! session.assert_line_content(1, "Hello").await?;
//!
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

mod assertions;
mod lifecycle;
mod queries;

use std::path::Path;

use crate::error::{NvimAgentError, Result};
use crate::rpc::NvimClient;
use crate::transport::NvimProcess;
use crate::types::identifiers::SessionId;

/// Scripted editor session
///
/// Queries take `&self` and always round-trip to the editor. Dropping the
/// session kills the editor; call [`close`](Self::close) for an orderly exit.
#[derive(Debug)]
pub struct NvimSession {
    /// Session identifier used in log lines
    id: SessionId,
    /// RPC connection, `None` once closed (dropped before the process)
    client: Option<NvimClient>,
    /// Editor process, `None` once closed
    process: Option<NvimProcess>,
    /// Lines the buffer was seeded with
    initial_content: Vec<String>,
}

impl NvimSession {
    /// Session identifier
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Whether the session is still connected
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.client.is_some()
    }

    /// Socket the editor listens on, while the session is open
    #[must_use]
    pub fn socket_path(&self) -> Option<&Path> {
        self.process.as_ref().map(NvimProcess::socket_path)
    }

    /// OS process id of the editor, while the session is open
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.process.as_ref().and_then(NvimProcess::pid)
    }

    /// Lines the buffer was seeded with at startup
    #[must_use]
    pub fn initial_content(&self) -> &[String] {
        &self.initial_content
    }

    /// Connected RPC client
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] after [`close`](Self::close)
    pub fn client(&self) -> Result<&NvimClient> {
        self.client.as_ref().ok_or(NvimAgentError::SessionClosed)
    }
}
