//! `VimAgent`: history-keeping editing agent on top of a session
//!
//! The agent runs keystrokes through an [`NvimSession`], records what each
//! command left behind, and renders the current state as text a language
//! model can read and answer with more keystrokes.
//!
//! ```no_run
//! use nvim_agent::{FormatOptions, SessionOptions, VimAgent};
//!
//! # async fn example() -> nvim_agent::Result<()> {
//! let options = SessionOptions::builder()
//!     .initial_content(["def f():", "    pass"])
//!     .build();
//! let mut agent = VimAgent::new(options).await?;
//!
//! agent.execute_command("jwcwreturn 1<Esc>", "replace pass").await?;
//! log::info!("{}", agent.format_state_for_llm(&FormatOptions::with_history(5)).await?);
//!
//! agent.close().await?;
//! # Ok(())
//! # }
//! ```

mod commands;
mod format;
mod helpers;

use chrono::Utc;

use crate::error::{NvimAgentError, Result};
use crate::session::NvimSession;
use crate::types::options::SessionOptions;
use crate::types::state::EditorState;

pub use commands::{BatchFailure, BatchReport, CommandRecord, EditCommand};
pub use format::{CURSOR_MARKER, FormatOptions, render_state};
pub use helpers::{
    BufferSummary, ContextLine, ContextWindow, DEFAULT_LINES_AFTER, DEFAULT_LINES_BEFORE,
    SessionSummary, buffer_summary, context_window, insert_cursor_marker, suggestions_for,
};

/// Text returned by [`VimAgent::format_state_for_llm`] once the agent is closed
pub const INACTIVE_MESSAGE: &str = "Editor session is not active";

/// Editing agent with an append-only command history
pub struct VimAgent {
    /// Session, `None` once closed
    session: Option<NvimSession>,
    /// Executed commands, oldest first
    history: Vec<CommandRecord>,
    /// Every snapshot recorded, starting with the initial state
    state_history: Vec<EditorState>,
}

impl VimAgent {
    /// Start a session and record its initial state
    ///
    /// # Errors
    /// Returns the startup error from [`NvimSession::start`]
    pub async fn new(options: SessionOptions) -> Result<Self> {
        let session = NvimSession::start(options).await?;
        Self::from_session(session).await
    }

    /// Wrap an already running session
    ///
    /// # Errors
    /// Returns the RPC error if the initial state cannot be read
    pub async fn from_session(session: NvimSession) -> Result<Self> {
        let initial = session.capture_state().await?;
        Ok(Self {
            session: Some(session),
            history: Vec::new(),
            state_history: vec![initial],
        })
    }

    /// Whether the session is still open
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(NvimSession::is_active)
    }

    /// Underlying session
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] after [`close`](Self::close)
    pub fn session(&self) -> Result<&NvimSession> {
        self.session
            .as_ref()
            .filter(|s| s.is_active())
            .ok_or(NvimAgentError::SessionClosed)
    }

    /// Executed commands, oldest first
    #[must_use]
    pub fn history(&self) -> &[CommandRecord] {
        &self.history
    }

    /// Recorded snapshots, starting with the initial state
    #[must_use]
    pub fn state_history(&self) -> &[EditorState] {
        &self.state_history
    }

    /// Fresh snapshot of the editor
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] or the RPC error
    pub async fn get_current_state(&self) -> Result<EditorState> {
        self.session()?.capture_state().await
    }

    /// Feed keystrokes, then record and return the resulting state
    ///
    /// # Errors
    /// Returns the RPC error unmodified; nothing is recorded in that case
    pub async fn execute_command(
        &mut self,
        keystrokes: &str,
        description: &str,
    ) -> Result<CommandRecord> {
        self.run(EditCommand::new(keystrokes, description)).await
    }

    /// Run commands in order, stopping at the first failure
    ///
    /// Edits made before the failure stay applied; there is no rollback.
    pub async fn execute_commands<I, C>(&mut self, commands: I) -> BatchReport
    where
        I: IntoIterator<Item = C>,
        C: Into<EditCommand>,
    {
        let mut report = BatchReport::default();

        for (index, command) in commands.into_iter().map(Into::into).enumerate() {
            match self.run(command.clone()).await {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    log::debug!(
                        "batch stopped at command {index} ({}): {error}",
                        command.label()
                    );
                    report.failure = Some(BatchFailure {
                        index,
                        command,
                        error,
                    });
                    break;
                }
            }
        }

        report
    }

    async fn run(&mut self, command: EditCommand) -> Result<CommandRecord> {
        let session = self.session()?;
        session.type_keys(&command.keystrokes).await?;
        let state = session.capture_state().await?;

        let record = CommandRecord {
            command,
            state: state.clone(),
            executed_at: Utc::now(),
        };
        log::debug!(
            "[{}] {} -> mode {}, cursor {}",
            session.id().short(),
            record.message(),
            state.mode,
            state.cursor
        );

        self.state_history.push(state);
        self.history.push(record.clone());
        Ok(record)
    }

    /// Counts and positions for the current buffer
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] or the RPC error
    pub async fn get_buffer_summary(&self) -> Result<BufferSummary> {
        Ok(buffer_summary(&self.get_current_state().await?))
    }

    /// Lines around the cursor
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] or the RPC error
    pub async fn get_context_window(&self, before: usize, after: usize) -> Result<ContextWindow> {
        Ok(context_window(&self.get_current_state().await?, before, after))
    }

    /// Suggested next actions for the current mode
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] or the RPC error
    pub async fn suggest_next_actions(&self) -> Result<Vec<&'static str>> {
        let mode = self.session()?.get_mode().await?;
        Ok(suggestions_for(&mode).to_vec())
    }

    /// Overview of the whole editing session
    ///
    /// # Errors
    /// Returns [`NvimAgentError::SessionClosed`] or the RPC error
    pub async fn get_session_summary(&self) -> Result<SessionSummary> {
        let current_state = self.get_current_state().await?;
        let started = self
            .state_history
            .first()
            .map_or(current_state.captured_at, |s| s.captured_at);

        Ok(SessionSummary {
            total_commands: self.history.len(),
            session_duration_ms: (current_state.captured_at - started).num_milliseconds(),
            current_state,
            command_history: self.history.clone(),
            state_changes: self.state_history.len(),
        })
    }

    /// Describe the current state for a language model
    ///
    /// Returns [`INACTIVE_MESSAGE`] once closed.
    ///
    /// # Errors
    /// Returns the RPC error if the state cannot be read
    pub async fn format_state_for_llm(&self, options: &FormatOptions) -> Result<String> {
        if !self.is_active() {
            return Ok(INACTIVE_MESSAGE.to_string());
        }

        let state = self.get_current_state().await?;
        Ok(render_state(&state, &self.history, options))
    }

    /// Close the session; history stays readable
    ///
    /// # Errors
    /// Returns error if the editor process cannot be reaped
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut session) = self.session.take() {
            session.close().await?;
        }
        Ok(())
    }
}
