//! Replay a candidate solution in a fresh editor

use serde::Serialize;

use crate::error::Result;
use crate::keystrokes::count_keystrokes;
use crate::session::NvimSession;
use crate::types::mode::Mode;
use crate::types::options::{SessionOptions, SessionOptionsBuilder};

use super::problems::GolfProblem;

/// Outcome of replaying a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GolfEvaluation {
    /// Challenge that was attempted
    pub problem_id: String,
    /// Keystrokes as submitted
    pub keystrokes: String,
    /// Keystroke count in vim notation
    pub keystroke_count: usize,
    /// Whether the buffer matched the target text exactly
    pub solved: bool,
    /// Buffer text after the replay
    pub final_text: String,
    /// Mode after the replay
    pub final_mode: Mode,
}

/// Seed a new session with the challenge text, replay `keystrokes`, and
/// compare the buffer to the target
///
/// `options` supplies the editor path and timeouts; its initial content is
/// replaced by the challenge's start text. The session is closed before
/// returning, also when the replay fails.
///
/// # Errors
/// Returns startup errors from [`NvimSession::start`] and RPC errors from
/// the replay
pub async fn evaluate_solution(
    problem: &GolfProblem,
    keystrokes: &str,
    options: SessionOptions,
) -> Result<GolfEvaluation> {
    let options = SessionOptionsBuilder::from_options(options)
        .initial_text(problem.start_text)
        .build();
    let mut session = NvimSession::start(options).await?;

    let outcome = replay(&session, keystrokes).await;
    if let Err(e) = session.close().await {
        log::warn!("[{}] failed to close golf session: {e}", session.id().short());
    }
    let (final_text, final_mode) = outcome?;

    let solved = final_text == problem.end_text;
    let keystroke_count = count_keystrokes(keystrokes);
    log::debug!("golf {}: {keystroke_count} keystrokes, solved={solved}", problem.id);

    Ok(GolfEvaluation {
        problem_id: problem.id.to_string(),
        keystrokes: keystrokes.to_string(),
        keystroke_count,
        solved,
        final_text,
        final_mode,
    })
}

async fn replay(session: &NvimSession, keystrokes: &str) -> Result<(String, Mode)> {
    session.type_keys(keystrokes).await?;
    let text = session.get_buffer_content().await?.join("\n");
    let mode = session.get_mode().await?;
    Ok((text, mode))
}
