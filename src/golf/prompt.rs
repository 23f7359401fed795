//! Prompt text for a challenge

use super::problems::GolfProblem;

/// System message to pair with [`build_prompt`]
pub const SYSTEM_PROMPT: &str =
    "You are a Vim expert who excels at solving VimGolf challenges with minimal keystrokes.";

/// Build the user prompt asking a model to solve `problem`
///
/// The requested `Solution:` line is what
/// [`extract_solution`](crate::keystrokes::extract_solution) looks for first.
#[must_use]
pub fn build_prompt(problem: &GolfProblem) -> String {
    format!(
        "You are a Vim expert solving a VimGolf challenge. Your goal is to transform the START text into the END text using the minimum number of Vim keystrokes.

PROBLEM: {title}
DESCRIPTION: {description}
PROBLEM ID: {id}

START TEXT:
```
{start}
```

END TEXT:
```
{end}
```

INSTRUCTIONS:
1. Assume you start in normal mode with cursor at position 1,1 (beginning of file)
2. Provide the exact sequence of Vim keystrokes needed
3. Use standard Vim notation (e.g., <Esc>, <CR> for Enter, <C-a> for Ctrl+A)
4. Aim for the minimum number of keystrokes possible
5. Explain your solution step by step
6. Count the total keystrokes in your solution

RESPONSE FORMAT:
Solution: [your vim keystroke sequence]
Keystrokes: [total count]
Explanation: [step by step breakdown]

Remember: Every character counts in VimGolf! Be as efficient as possible.",
        title = problem.title,
        description = problem.description,
        id = problem.id,
        start = problem.start_text,
        end = problem.end_text,
    )
}
