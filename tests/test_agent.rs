//! Integration tests for `VimAgent`

mod common;

use nvim_agent::agent::INACTIVE_MESSAGE;
use nvim_agent::{EditCommand, FormatOptions, NvimAgentError, VimAgent};

#[tokio::test]
async fn test_new_agent_records_initial_state() {
    let Some(options) = common::nvim_options_with(&["hello"]) else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();

    assert!(agent.is_active());
    assert!(agent.history().is_empty());
    assert_eq!(agent.state_history().len(), 1);
    assert_eq!(agent.state_history()[0].buffer_content, vec!["hello"]);

    let state = agent.get_current_state().await.unwrap();
    assert!(state.mode.is_normal());
    assert_eq!(state.cursor.row, 1);

    agent.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_command_appends_history() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();

    let record = agent
        .execute_command("iHello<Esc>", "insert greeting")
        .await
        .unwrap();
    assert_eq!(record.message(), "Executed: insert greeting");
    assert_eq!(record.state.buffer_content, vec!["Hello"]);
    assert!(record.state.mode.is_normal());

    let record = agent.execute_command("A world<Esc>", "").await.unwrap();
    assert_eq!(record.message(), "Executed: A world<Esc>");

    let history = agent.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].command.keystrokes, "iHello<Esc>");
    assert_eq!(history[0].state.buffer_content, vec!["Hello"]);
    assert_eq!(history[1].state.buffer_content, vec!["Hello world"]);
    assert!(history[0].executed_at <= history[1].executed_at);
    assert_eq!(agent.state_history().len(), 3);

    agent.close().await.unwrap();
}

#[tokio::test]
async fn test_execute_commands_batch() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();

    let report = agent
        .execute_commands([
            EditCommand::new("ifirst<Esc>", "first line"),
            EditCommand::new("osecond<Esc>", "second line"),
            EditCommand::from("gg"),
        ])
        .await;

    assert!(report.is_success());
    assert_eq!(report.completed(), 3);
    let last = report.final_state().unwrap();
    assert_eq!(last.buffer_content, vec!["first", "second"]);
    assert_eq!(last.cursor.row, 1);
    assert_eq!(agent.history().len(), 3);

    agent.close().await.unwrap();
}

#[tokio::test]
async fn test_batch_stops_at_first_failure() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();
    agent.execute_command("ikept<Esc>", "").await.unwrap();
    agent.close().await.unwrap();

    let report = agent.execute_commands(["dd", "u"]).await;

    assert!(!report.is_success());
    assert_eq!(report.completed(), 0);
    let failure = report.failure.unwrap();
    assert_eq!(failure.index, 0);
    assert_eq!(failure.command.keystrokes, "dd");
    assert!(matches!(failure.error, NvimAgentError::SessionClosed));

    // history survives close and is not touched by the failed batch
    assert_eq!(agent.history().len(), 1);
    assert_eq!(agent.history()[0].state.buffer_content, vec!["kept"]);
}

#[tokio::test]
async fn test_views_over_current_state() {
    let Some(options) = common::nvim_options_with(&["a", "b", "c", "d", "e", "f", "g"]) else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();
    agent.execute_command("3j", "down three").await.unwrap();

    let summary = agent.get_buffer_summary().await.unwrap();
    assert_eq!(summary.line_count, 7);
    assert_eq!(summary.current_line_content, "d");
    assert_eq!(summary.total_characters, 7);
    assert!(!summary.is_empty);

    let window = agent.get_context_window(1, 1).await.unwrap();
    assert_eq!(window.window_start, 3);
    assert_eq!(window.window_end, 5);
    assert_eq!(window.lines.len(), 3);
    assert!(window.lines[1].is_cursor_line);

    let suggestions = agent.suggest_next_actions().await.unwrap();
    assert!(suggestions.iter().any(|s| s.starts_with("dd")));

    let session = agent.get_session_summary().await.unwrap();
    assert_eq!(session.total_commands, 1);
    assert_eq!(session.state_changes, 2);
    assert!(session.session_duration_ms >= 0);

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["total_commands"], 1);
    assert_eq!(json["command_history"][0]["command"]["keystrokes"], "3j");

    agent.close().await.unwrap();
}

#[tokio::test]
async fn test_format_state_for_llm() {
    let Some(options) = common::nvim_options_with(&["def f():", "    pass"]) else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();
    agent.execute_command("jw", "to pass").await.unwrap();

    let text = agent
        .format_state_for_llm(&FormatOptions::with_history(5))
        .await
        .unwrap();
    assert!(text.starts_with("=== VIM EDITOR STATE ==="));
    assert!(text.contains("Mode: n (normal)"));
    assert!(text.contains("Cursor: Line 2, Column 4"));
    assert!(text.contains(" ►   2:     │pass"));
    assert!(text.contains("=== RECENT COMMANDS ==="));
    assert!(text.contains("to pass"));
    assert!(text.contains("=== SUGGESTED ACTIONS ==="));

    // rendering does not touch the editor
    let again = agent
        .format_state_for_llm(&FormatOptions::with_history(5))
        .await
        .unwrap();
    assert_eq!(text, again);
    assert_eq!(agent.history().len(), 1);

    agent.close().await.unwrap();
    assert_eq!(
        agent
            .format_state_for_llm(&FormatOptions::default())
            .await
            .unwrap(),
        INACTIVE_MESSAGE
    );
}

#[tokio::test]
async fn test_closed_agent_queries_fail() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut agent = VimAgent::new(options).await.unwrap();
    agent.close().await.unwrap();
    agent.close().await.unwrap();

    assert!(!agent.is_active());
    assert!(matches!(
        agent.get_current_state().await,
        Err(NvimAgentError::SessionClosed)
    ));
    assert!(matches!(
        agent.execute_command("x", "").await,
        Err(NvimAgentError::SessionClosed)
    ));
    assert!(agent.history().is_empty());
}
