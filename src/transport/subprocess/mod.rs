//! Headless editor subprocess
//!
//! Spawns `nvim --headless --listen <socket>` and owns the child until it
//! exits or is killed.

mod command;
mod config;
mod lifecycle;
mod reader;
mod transport;

// Re-export public types
pub use command::CommandBuilder;
pub use config::{
    ALLOWED_EXTRA_FLAGS, BASE_ARGS, MAX_SOCKET_PATH_LEN, SOCKET_FILE_NAME, SOCKET_POLL_INTERVAL,
};
pub use transport::NvimProcess;
