//! # nvim-agent
//!
//! Drive a headless Neovim from Rust: spawn the editor, type keystrokes in
//! vim notation, read back mode, cursor and buffer, and hand the result to a
//! language model as text. All editing semantics stay inside `nvim`; this
//! crate only forwards keys and reads state.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nvim_agent::NvimSession;
//!
//! #[tokio::main]
//! async fn main() -> nvim_agent::Result<()> {
//!     let mut session = NvimSession::with_content(["def f():", "    pass"]).await?;
//!
//!     session.type_keys("jwcwreturn 1<Esc>").await?;
//!     session.assert_mode("n").await?;
//!     session.assert_line_content(2, "    return 1").await?;
//!
//!     session.close().await
//! }
//! ```
//!
//! ## Core Features
//!
//! ### 1. Sessions with [`NvimSession`]
//!
//! One session owns one `nvim --headless --listen` process and one RPC
//! connection. Queries are never cached: every call asks the editor.
//!
//! ```no_run
//! # use nvim_agent::{NvimSession, SessionOptions};
//! # use std::time::Duration;
//! # async fn example() -> nvim_agent::Result<()> {
//! let options = SessionOptions::builder()
//!     .initial_text("hello\nworld")
//!     .startup_timeout(Duration::from_secs(10))
//!     .build();
//!
//! let mut session = NvimSession::start(options).await?;
//! session.type_keys("A!<Esc>").await?;
//! assert_eq!(session.get_current_line().await?, "hello!");
//! session.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. Agents with [`VimAgent`]
//!
//! The agent keeps an append-only history of commands and the states they
//! produced, and renders the current state for a model:
//!
//! ```no_run
//! # use nvim_agent::{EditCommand, FormatOptions, SessionOptions, VimAgent};
//! # async fn example() -> nvim_agent::Result<()> {
//! let mut agent = VimAgent::new(SessionOptions::default()).await?;
//!
//! let report = agent
//!     .execute_commands([
//!         EditCommand::new("iHello<Esc>", "insert greeting"),
//!         EditCommand::new("o world<Esc>", "second line"),
//!     ])
//!     .await;
//! assert!(report.is_success());
//!
//! let prompt = agent.format_state_for_llm(&FormatOptions::default()).await?;
//! log::info!("{prompt}");
//! agent.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Keystrokes and golf
//!
//! [`keystrokes`] counts keystrokes in vim notation and pulls a keystroke
//! sequence out of a model's free-form answer. [`golf`] holds a catalogue of
//! VimGolf-style challenges and replays candidate answers in a real editor.
//!
//! ## Architecture
//!
//! - [`types`]: Newtypes, snapshots and the options builder
//! - [`transport`]: Spawning and reaping the `nvim` process
//! - [`rpc`]: The `nvim-rs` connection
//! - [`session`]: [`NvimSession`], queries and assertions
//! - [`agent`]: [`VimAgent`], history and state formatting
//! - [`keystrokes`]: Keystroke counting and solution extraction
//! - [`golf`]: Challenge catalogue and evaluator
//! - [`error`]: Error types and handling
//!
//! ## Requirements
//!
//! - A Unix platform (the editor is reached over a Unix socket)
//! - Neovim on `PATH`, or its path in `NVIM_AGENT_NVIM`
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, NvimAgentError>`](Result):
//!
//! ```no_run
//! # use nvim_agent::{NvimAgentError, NvimSession, SessionOptions};
//! # async fn example() {
//! match NvimSession::start(SessionOptions::default()).await {
//!     Ok(session) => { /* ... */ }
//!     Err(NvimAgentError::NvimNotFound(msg)) => {
//!         log::error!("Neovim not installed: {}", msg);
//!     }
//!     Err(e) => {
//!         log::error!("Error: {}", e);
//!     }
//! }
//! # }
//! ```
//!
//! ## Resource management
//!
//! - The editor is spawned with `kill_on_drop`, so dropping a session without
//!   closing it still terminates the process
//! - The socket lives in a private temporary directory removed on close
//! - Environment variables such as `LD_PRELOAD` and `VIMINIT` are never
//!   passed to the editor, and extra flags are checked against an allowlist

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod error;
pub mod golf;
pub mod keystrokes;
pub mod rpc;
pub mod session;
pub mod transport;
pub mod types;

// Re-export commonly used types for external API
pub use agent::{BatchReport, CommandRecord, EditCommand, FormatOptions, VimAgent};
pub use error::{NvimAgentError, Result};
pub use rpc::NvimClient;
pub use session::NvimSession;
pub use transport::NvimProcess;

// Re-export type submodules for flat public API
pub use types::cursor::CursorPosition;
pub use types::identifiers::SessionId;
pub use types::mode::Mode;
pub use types::options::{SessionOptions, SessionOptionsBuilder};
pub use types::state::EditorState;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
