//! Stderr forwarding for the editor process

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::ChildStderr;
use tokio::task::JoinHandle;

use crate::types::identifiers::SessionId;

/// Spawn a task that drains the editor's stderr into the log
///
/// Headless nvim reports `--listen` failures and startup errors on stderr.
/// The pipe must be drained or the editor can block on a full buffer.
pub(super) fn spawn_stderr_forwarder(
    session_id: SessionId,
    stderr: ChildStderr,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim_end();
                    if !line.is_empty() {
                        log::debug!("[{}] nvim stderr: {line}", session_id.short());
                    }
                }
                Ok(None) | Err(_) => break, // EOF
            }
        }
    })
}
