//! Unit tests for core types, options and errors

use std::time::Duration;

use nvim_agent::rpc::mode_from_reply;
use nvim_agent::types::options::{DEFAULT_SHUTDOWN_TIMEOUT, DEFAULT_STARTUP_TIMEOUT};
use nvim_agent::{
    CursorPosition, EditCommand, EditorState, Mode, NvimAgentError, SessionId, SessionOptions,
};
use nvim_rs::Value;

#[test]
fn test_session_options_defaults() {
    let options = SessionOptions::default();
    assert!(options.nvim_path.is_none());
    assert!(options.socket_path.is_none());
    assert_eq!(options.startup_timeout, DEFAULT_STARTUP_TIMEOUT);
    assert_eq!(options.shutdown_timeout, DEFAULT_SHUTDOWN_TIMEOUT);
    assert_eq!(options.seed_lines(), vec![String::new()]);
}

#[test]
fn test_session_options_builder() {
    let options = SessionOptions::builder()
        .nvim_path("/opt/nvim/bin/nvim")
        .initial_text("one\ntwo\n")
        .startup_timeout(Duration::from_millis(250))
        .shutdown_timeout(Duration::from_secs(1))
        .cwd("/tmp")
        .build();

    assert_eq!(
        options.nvim_path.as_deref(),
        Some(std::path::Path::new("/opt/nvim/bin/nvim"))
    );
    // a trailing newline yields a trailing empty line
    assert_eq!(options.seed_lines(), vec!["one", "two", ""]);
    assert_eq!(options.startup_timeout, Duration::from_millis(250));
    assert_eq!(options.shutdown_timeout, Duration::from_secs(1));
}

#[test]
#[should_panic(expected = "startup_timeout must be non-zero")]
fn test_zero_startup_timeout_panics() {
    let _ = SessionOptions::builder().startup_timeout(Duration::ZERO);
}

#[test]
fn test_mode() {
    let mode = Mode::from("n");
    assert!(mode.is_normal());
    assert!(!mode.is_insert());
    assert_eq!(mode.describe(), "normal");
    assert_eq!(mode, "n");

    assert!(Mode::from(Mode::VISUAL_BLOCK).is_visual());
    assert_eq!(Mode::from("V").describe(), "visual line");
    assert_eq!(Mode::from("no").describe(), "operator-pending");
    assert_eq!(Mode::from("rm").describe(), "rm");
    assert_eq!(Mode::from("i").to_string(), "i");
}

#[test]
fn test_mode_from_reply() {
    let reply = vec![
        (Value::from("mode"), Value::from("i")),
        (Value::from("blocking"), Value::from(false)),
    ];
    assert_eq!(mode_from_reply(&reply).unwrap(), "i");

    let missing = vec![(Value::from("blocking"), Value::from(false))];
    assert!(matches!(
        mode_from_reply(&missing),
        Err(NvimAgentError::UnexpectedReply(_))
    ));
}

#[test]
fn test_cursor_position() {
    let cursor = CursorPosition::from_rpc((3, 7)).unwrap();
    assert_eq!(cursor, CursorPosition::new(3, 7));
    assert_eq!(cursor.to_string(), "(3, 7)");

    assert!(CursorPosition::from_rpc((-1, 0)).is_err());
    assert!(CursorPosition::from_rpc((1, -4)).is_err());
}

#[test]
fn test_editor_state_helpers() {
    let state = EditorState::new(
        vec!["abc".to_string(), "de".to_string()],
        CursorPosition::new(2, 1),
        Mode::from("n"),
    );
    assert_eq!(state.line_count(), 2);
    assert_eq!(state.current_line(), "de");
    assert_eq!(state.total_characters(), 5);
    assert_eq!(state.text(), "abc\nde");
    assert!(!state.is_empty());

    let out_of_range =
        EditorState::new(vec![String::new()], CursorPosition::new(0, 0), Mode::from("n"));
    assert_eq!(out_of_range.current_line(), "");
    assert!(out_of_range.is_empty());
}

#[test]
fn test_session_id() {
    let a = SessionId::generate();
    let b = SessionId::generate();
    assert_ne!(a, b);
    assert_eq!(a.short().len(), 8);
    assert!(a.as_str().starts_with(a.short()));
    assert_eq!(SessionId::from("abc").short(), "abc");
}

#[test]
fn test_edit_command_from_json() {
    let commands: Vec<EditCommand> = serde_json::from_str(
        r#"[{"keystrokes": "gg", "description": "top"}, {"keystrokes": "dd"}]"#,
    )
    .unwrap();

    assert_eq!(commands[0], EditCommand::new("gg", "top"));
    assert_eq!(commands[0].label(), "top");
    assert_eq!(commands[1].description, "");
    assert_eq!(commands[1].label(), "dd");
}

#[test]
fn test_error_classification() {
    assert!(NvimAgentError::nvim_not_found().is_startup());
    assert!(NvimAgentError::timeout("socket never appeared").is_startup());
    assert!(!NvimAgentError::SessionClosed.is_startup());

    let err = NvimAgentError::assertion("mode", "'i'", "'n'");
    assert!(err.is_assertion());
    assert_eq!(err.to_string(), "Assertion failed: mode: expected 'i', got 'n'");

    let err = NvimAgentError::LineOutOfRange {
        line: 4,
        line_count: 2,
    };
    assert_eq!(err.to_string(), "Line 4 out of range (buffer has 2 lines)");
}
