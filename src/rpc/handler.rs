//! Handler for messages the editor sends unprompted

use async_trait::async_trait;
use nvim_rs::{Handler, Neovim, Value};

use crate::types::identifiers::SessionId;

use super::Writer;

/// Handler that logs notifications and refuses requests
///
/// Sessions never subscribe to events, so anything arriving here is
/// unexpected and only interesting when tracing.
#[derive(Clone)]
pub struct NotificationLogger {
    session_id: SessionId,
}

impl NotificationLogger {
    /// Create a handler tagged with the owning session
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }
}

#[async_trait]
impl Handler for NotificationLogger {
    type Writer = Writer;

    async fn handle_request(
        &self,
        name: String,
        _args: Vec<Value>,
        _neovim: Neovim<Writer>,
    ) -> Result<Value, Value> {
        log::debug!(
            "[{}] refusing editor request '{name}'",
            self.session_id.short()
        );
        Err(Value::from(format!("nvim-agent does not handle '{name}'")))
    }

    async fn handle_notify(&self, name: String, args: Vec<Value>, _neovim: Neovim<Writer>) {
        log::trace!(
            "[{}] notification '{name}' with {} args",
            self.session_id.short(),
            args.len()
        );
    }
}
