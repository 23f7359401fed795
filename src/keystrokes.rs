//! Keystroke counting and extraction from model responses
//!
//! Both functions work on vim notation as text; nothing here talks to an
//! editor.

use std::sync::LazyLock;

use regex::Regex;

/// Special keys that count as a single keystroke (case-insensitive)
static SPECIAL_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<(?:CR|Enter|Return|Esc|Escape|Tab|S-Tab|BS|Backspace|Del|Delete|Up|Down|Left|Right|C-[a-z0-9]|S-[a-z]|A-[a-z]|F[0-9]+|Home|End|PageUp|PageDown|Insert)>",
    )
    .expect("special key pattern is valid")
});

/// Heuristics for text that reads like a vim command
static VIM_COMMAND_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^:",             // ex commands
        r"^[0-9]*[a-zA-Z]", // normal-mode commands with optional count
        r"<[A-Z][a-z]*>",  // special keys
        r"[ijaoIO]",       // insert commands
        r"[/?]",           // searches
        r#"['"`]"#,        // marks and registers
    ]
    .iter()
    .map(|p| Regex::new(p).expect("vim command pattern is valid"))
    .collect()
});

/// `Solution:` followed by the rest of the line (possibly after blank space)
static SOLUTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Solution:\s*([^\n]+)").expect("solution pattern is valid"));

/// Fenced code block, optionally tagged `vim` or `viml`
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)```(?:vim|viml)?\n([^`]+)\n```").expect("code block pattern is valid")
});

/// Single-line inline code
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern is valid"));

/// Lead-ins that mark a line as prose rather than keystrokes
const PROSE_PREFIXES: &[&str] = &[
    "the vim keystrokes are:",
    "i would use",
    "here's",
    "this will",
    "explanation:",
    "keystrokes:",
    "step",
    "first",
    "then",
    "next",
];

/// Bare code fences that sometimes follow `Solution:`
const FENCE_MARKERS: &[&str] = &["```", "```vim", "```viml"];

/// Count keystrokes in vim notation
///
/// Each special key (`<CR>`, `<Esc>`, `<C-a>`, `<F12>`, ...) counts as one;
/// every other character counts as one.
///
/// ```
/// use nvim_agent::keystrokes::count_keystrokes;
///
/// assert_eq!(count_keystrokes("iHello<Esc>"), 7);
/// assert_eq!(count_keystrokes(":%s/a/b/g<CR>"), 10);
/// ```
#[must_use]
pub fn count_keystrokes(sequence: &str) -> usize {
    let special = SPECIAL_KEY.find_iter(sequence).count();
    let rest = SPECIAL_KEY.replace_all(sequence, "");
    special + rest.chars().count()
}

/// Whether `text` looks like a keystroke sequence rather than prose
#[must_use]
pub fn looks_like_vim_command(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let lower = text.to_lowercase();
    if PROSE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return false;
    }

    VIM_COMMAND_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Strip one pair of surrounding backticks
///
/// A lone backtick counts as an empty pair.
#[must_use]
pub fn clean_backticks(text: &str) -> &str {
    let text = text.trim();
    match text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
        Some(inner) => inner.trim(),
        None if text == "`" => "",
        None => text,
    }
}

/// Pull a keystroke sequence out of a free-form model response
///
/// Tried in order: the `Solution:` line, a fenced code block, inline code,
/// then the first line that looks like a command.
#[must_use]
pub fn extract_solution(response: &str) -> Option<String> {
    if let Some(caps) = SOLUTION_LINE.captures(response) {
        let candidate = caps[1].trim();
        if !FENCE_MARKERS.contains(&candidate) {
            let candidate = clean_backticks(candidate);
            if looks_like_vim_command(candidate) {
                return Some(candidate.to_string());
            }
        }
    }

    if let Some(caps) = CODE_BLOCK.captures(response) {
        let candidate = caps[1].trim();
        if looks_like_vim_command(candidate) {
            return Some(candidate.to_string());
        }
    }

    if let Some(caps) = INLINE_CODE.captures(response) {
        let candidate = caps[1].trim();
        if looks_like_vim_command(candidate) {
            return Some(candidate.to_string());
        }
    }

    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .map(clean_backticks)
        .find(|line| looks_like_vim_command(line))
        .map(str::to_string)
}
