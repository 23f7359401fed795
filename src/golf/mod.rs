//! VimGolf-style challenges
//!
//! A small built-in catalogue, the prompt handed to a model for each
//! challenge, and an evaluator that replays an answer in a real editor.
//!
//! ```no_run
//! use nvim_agent::golf::{evaluate_solution, find_problem};
//! use nvim_agent::SessionOptions;
//!
//! # async fn example() -> nvim_agent::Result<()> {
//! let problem = find_problem("9v0066d89856").expect("built-in problem");
//! let result = evaluate_solution(
//!     problem,
//!     ":%s/ \\(.*\\)/T\\1Z/<CR>",
//!     SessionOptions::default(),
//! )
//! .await?;
//! assert!(result.solved);
//! # Ok(())
//! # }
//! ```

mod evaluate;
mod problems;
mod prompt;

pub use evaluate::{GolfEvaluation, evaluate_solution};
pub use problems::{GolfProblem, PROBLEMS, find_problem};
pub use prompt::{SYSTEM_PROMPT, build_prompt};
