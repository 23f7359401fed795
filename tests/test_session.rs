//! Integration tests for `NvimSession`
//!
//! Each test drives a real headless editor and is skipped when `nvim` is not
//! installed.

mod common;

use std::time::Duration;

use nvim_agent::{NvimAgentError, NvimSession, SessionOptions};

#[tokio::test]
async fn test_starts_in_normal_mode_at_top() {
    let Some(options) = common::nvim_options() else {
        return;
    };

    let mut session = NvimSession::start(options).await.unwrap();
    assert!(session.is_active());
    assert!(session.pid().is_some());

    session.assert_mode("n").await.unwrap();
    session.assert_cursor_at(1, 0).await.unwrap();
    assert_eq!(session.get_buffer_content().await.unwrap(), vec![String::new()]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_insert_then_escape() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    session.type_keys("i").await.unwrap();
    assert_eq!(session.get_mode().await.unwrap(), "i");

    session.type_keys("Hi<Esc>").await.unwrap();
    assert_eq!(session.get_mode().await.unwrap(), "n");
    assert_eq!(session.get_buffer_content().await.unwrap(), vec!["Hi"]);

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_insert_at_cursor_position() {
    let Some(options) = common::nvim_options_with(&["hello world"]) else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    session.type_keys("w").await.unwrap();
    session.assert_cursor_at(1, 6).await.unwrap();

    session.type_keys("ibig <Esc>").await.unwrap();
    session.assert_mode("n").await.unwrap();
    session.assert_line_content(1, "hello big world").await.unwrap();

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_change_word_on_second_line() {
    let Some(options) = common::nvim_options_with(&["def f():", "    pass"]) else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();
    assert_eq!(session.initial_content(), ["def f():", "    pass"]);

    session.type_keys("jwcwreturn 1<Esc>").await.unwrap();

    session.assert_mode("n").await.unwrap();
    session.assert_line_content(2, "    return 1").await.unwrap();
    session
        .assert_buffer_content(&["def f():", "    return 1"])
        .await
        .unwrap();
    assert_eq!(session.get_current_line().await.unwrap(), "    return 1");

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_assert_mode_fails_on_mismatch() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    let err = session.assert_mode("i").await.unwrap_err();
    assert!(err.is_assertion());
    match err {
        NvimAgentError::Assertion {
            what,
            expected,
            actual,
        } => {
            assert_eq!(what, "mode");
            assert_eq!(expected, "'i'");
            assert_eq!(actual, "'n'");
        }
        other => panic!("unexpected error: {other}"),
    }

    session.type_keys("i").await.unwrap();
    session.assert_mode("i").await.unwrap();
    assert!(session.assert_mode("n").await.is_err());

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_assertions_report_expected_and_actual() {
    let Some(options) = common::nvim_options_with(&["alpha", "beta"]) else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    let err = session.assert_line_content(2, "gamma").await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("line 2"), "{text}");
    assert!(text.contains("'gamma'"), "{text}");
    assert!(text.contains("'beta'"), "{text}");

    let err = session.assert_cursor_at(2, 0).await.unwrap_err();
    assert!(err.is_assertion());

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_get_line_out_of_range() {
    let Some(options) = common::nvim_options_with(&["only"]) else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    assert_eq!(session.get_line(1).await.unwrap(), "only");
    assert!(matches!(
        session.get_line(0).await,
        Err(NvimAgentError::LineOutOfRange { line: 0, line_count: 1 })
    ));
    assert!(matches!(
        session.get_line(2).await,
        Err(NvimAgentError::LineOutOfRange { line: 2, line_count: 1 })
    ));

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_ex_command_and_set_content() {
    let Some(options) = common::nvim_options_with(&["one", "two", "three"]) else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    session.command("2delete").await.unwrap();
    session.assert_buffer_content(&["one", "three"]).await.unwrap();

    session.set_buffer_content(["x", "y"]).await.unwrap();
    assert_eq!(session.get_buffer_content().await.unwrap(), vec!["x", "y"]);

    session.type_keys(":%s/x/z/<CR>").await.unwrap();
    session.assert_line_content(1, "z").await.unwrap();

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_capture_state() {
    let Some(options) = common::nvim_options_with(&["first", "second"]) else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    session.type_keys("j$").await.unwrap();
    let state = session.capture_state().await.unwrap();
    assert_eq!(state.buffer_content, vec!["first", "second"]);
    assert_eq!(state.cursor.row, 2);
    assert_eq!(state.cursor.col, 5);
    assert!(state.mode.is_normal());
    assert_eq!(state.current_line(), "second");

    session.close().await.unwrap();
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();
    let socket = session.socket_path().map(ToOwned::to_owned).unwrap();

    session.close().await.unwrap();
    assert!(!session.is_active());
    assert!(session.socket_path().is_none());
    assert!(!socket.exists());

    session.close().await.unwrap();

    let err = session.type_keys("i").await.unwrap_err();
    assert!(matches!(err, NvimAgentError::SessionClosed));
}

#[tokio::test]
async fn test_drop_without_close() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let session = NvimSession::start(options).await.unwrap();
    let socket = session.socket_path().map(ToOwned::to_owned).unwrap();
    drop(session);

    assert!(!socket.exists());
}

#[tokio::test]
async fn test_malformed_socket_path_fails_startup() {
    common::init_logging();

    let options = SessionOptions::builder()
        .nvim_path("/nonexistent/nvim")
        .socket_path("/nonexistent-dir/nvim-agent/nvim.sock")
        .startup_timeout(Duration::from_millis(500))
        .build();

    let err = NvimSession::start(options).await.unwrap_err();
    assert!(err.is_startup(), "{err}");
}

#[tokio::test]
async fn test_missing_binary_fails_startup() {
    common::init_logging();

    let options = SessionOptions::builder()
        .nvim_path("/nonexistent/nvim")
        .startup_timeout(Duration::from_millis(500))
        .build();

    let err = NvimSession::start(options).await.unwrap_err();
    assert!(err.is_startup(), "{err}");
}

#[tokio::test]
async fn test_existing_socket_path_is_rejected() {
    common::init_logging();

    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("taken.sock");
    std::fs::write(&socket, b"").unwrap();

    let options = SessionOptions::builder()
        .nvim_path("/nonexistent/nvim")
        .socket_path(&socket)
        .build();

    let err = NvimSession::start(options).await.unwrap_err();
    assert!(matches!(err, NvimAgentError::Startup(_)), "{err}");
}

#[tokio::test]
async fn test_concurrent_sessions_are_isolated() {
    let (Some(first_options), Some(second_options)) =
        (common::nvim_options(), common::nvim_options())
    else {
        return;
    };

    let (first, second) = tokio::join!(
        NvimSession::start(first_options),
        NvimSession::start(second_options)
    );
    let mut first = first.unwrap();
    let mut second = second.unwrap();

    assert_ne!(first.id(), second.id());
    assert_ne!(first.socket_path(), second.socket_path());
    assert_ne!(first.pid(), second.pid());

    first.type_keys("ionly here").await.unwrap();
    assert_eq!(first.get_mode().await.unwrap(), "i");
    assert_eq!(first.get_buffer_content().await.unwrap(), vec!["only here"]);

    second.assert_mode("n").await.unwrap();
    second.assert_buffer_content(&[""]).await.unwrap();
    second.assert_cursor_at(1, 0).await.unwrap();

    let (a, b) = tokio::join!(first.type_keys("<Esc>dd"), second.type_keys("iother<Esc>"));
    a.unwrap();
    b.unwrap();
    first.assert_buffer_content(&[""]).await.unwrap();
    second.assert_buffer_content(&["other"]).await.unwrap();

    let (a, b) = tokio::join!(first.close(), second.close());
    a.unwrap();
    b.unwrap();
}

#[tokio::test]
async fn test_drop_removes_explicit_socket() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("agent.sock");
    let options = nvim_agent::SessionOptionsBuilder::from_options(options)
        .socket_path(&socket)
        .build();

    let session = NvimSession::start(options.clone()).await.unwrap();
    assert_eq!(session.socket_path(), Some(socket.as_path()));
    assert!(socket.exists());
    drop(session);

    assert!(!socket.exists());

    // the same path can be reused straight away
    let mut session = NvimSession::start(options).await.unwrap();
    session.close().await.unwrap();
    assert!(!socket.exists());
}

#[tokio::test]
async fn test_session_debug_output() {
    let Some(options) = common::nvim_options() else {
        return;
    };
    let mut session = NvimSession::start(options).await.unwrap();

    let text = format!("{session:?}");
    assert!(text.contains("NvimSession"), "{text}");
    assert!(text.contains(session.id().as_str()), "{text}");
    assert!(text.contains("nvim.sock"), "{text}");

    session.close().await.unwrap();
}
