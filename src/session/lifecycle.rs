//! Session start-up and teardown

use std::time::Duration;
use tokio::time::Instant;

use crate::error::{NvimAgentError, Result};
use crate::rpc::NvimClient;
use crate::transport::NvimProcess;
use crate::transport::subprocess::SOCKET_POLL_INTERVAL;
use crate::types::identifiers::SessionId;
use crate::types::options::SessionOptions;

use super::NvimSession;

/// How long `qa!` may take before the session stops waiting for a reply
const QUIT_GRACE: Duration = Duration::from_millis(500);

impl NvimSession {
    /// Start a headless editor and attach to it
    ///
    /// The buffer is seeded with `options.initial_content` (a single empty
    /// line if none), the cursor moved to the top, and the modified flag
    /// cleared, so the session looks like a freshly opened file in normal mode.
    ///
    /// # Errors
    /// Returns a startup error (see [`NvimAgentError::is_startup`]) if the
    /// editor cannot be found, spawned, or reached within
    /// `options.startup_timeout`. No process is left running on failure.
    pub async fn start(options: SessionOptions) -> Result<Self> {
        let id = SessionId::generate();
        let mut process = NvimProcess::spawn(id.clone(), &options)?;

        let client = match attach(&id, &mut process, options.startup_timeout).await {
            Ok(client) => client,
            Err(e) => {
                log::debug!("[{}] startup failed: {e}", id.short());
                process.kill().await;
                return Err(e);
            }
        };

        let mut session = Self {
            id,
            client: Some(client),
            process: Some(process),
            initial_content: options.seed_lines(),
        };

        let seed = session.initial_content.clone();
        if let Err(e) = session.reset(seed).await {
            if let Err(close_err) = session.close().await {
                log::warn!(
                    "[{}] cleanup after failed seed: {close_err}",
                    session.id.short()
                );
            }
            return Err(e);
        }

        log::debug!("[{}] session ready", session.id.short());
        Ok(session)
    }

    /// Start a session with default options and the given buffer lines
    ///
    /// # Errors
    /// Same as [`start`](Self::start)
    pub async fn with_content<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = SessionOptions::builder().initial_content(lines).build();
        Self::start(options).await
    }

    /// Replace the buffer and return to the top in normal mode
    ///
    /// # Errors
    /// Returns the RPC error unmodified
    pub async fn reset(&self, lines: Vec<String>) -> Result<()> {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        let client = self.client()?;
        client.set_lines(lines).await?;
        client.command("normal! gg").await?;
        client.command("set nomodified").await?;
        Ok(())
    }

    /// Quit the editor and release the process and socket
    ///
    /// Calling `close` twice is a no-op.
    ///
    /// # Errors
    /// Returns error if waiting on the process fails
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut client) = self.client.take() {
            client.quit(QUIT_GRACE).await;
            client.disconnect();
        }

        if let Some(mut process) = self.process.take() {
            process.shutdown().await?;
            log::debug!("[{}] session closed", self.id.short());
        }

        Ok(())
    }
}

/// Poll for the socket until the editor accepts a connection
async fn attach(
    id: &SessionId,
    process: &mut NvimProcess,
    timeout: Duration,
) -> Result<NvimClient> {
    let deadline = Instant::now() + timeout;
    let mut last_error: Option<std::io::Error> = None;

    loop {
        let exited = process
            .exit_status()
            .map_err(|e| NvimAgentError::startup(format!("Failed to poll nvim process: {e}")))?;
        if let Some(status) = exited {
            return Err(NvimAgentError::startup(format!(
                "nvim exited during startup ({status})"
            )));
        }

        if process.socket_ready() {
            match NvimClient::connect(id.clone(), process.socket_path()).await {
                Ok(client) => return Ok(client),
                Err(e) => {
                    log::trace!("[{}] connect attempt failed: {e}", id.short());
                    last_error = Some(e);
                }
            }
        }

        if Instant::now() >= deadline {
            let detail = last_error
                .map(|e| format!(" (last error: {e})"))
                .unwrap_or_default();
            return Err(NvimAgentError::timeout(format!(
                "nvim did not accept connections on {} within {timeout:?}{detail}",
                process.socket_path().display()
            )));
        }

        tokio::time::sleep(SOCKET_POLL_INTERVAL).await;
    }
}
