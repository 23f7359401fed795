//! Unit tests for the editor subprocess launcher

mod common;

use std::ffi::OsStr;
use std::path::Path;

use nvim_agent::transport::subprocess::MAX_SOCKET_PATH_LEN;
use nvim_agent::transport::{CommandBuilder, NvimProcess};
use nvim_agent::{SessionId, SessionOptions};

fn args_of(options: &SessionOptions) -> Vec<String> {
    let builder = CommandBuilder::new(
        Path::new("/usr/bin/nvim"),
        Path::new("/tmp/nvim-agent-test/nvim.sock"),
        options,
    );
    builder
        .build()
        .as_std()
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_base_command_line() {
    let args = args_of(&SessionOptions::default());
    assert_eq!(
        args,
        vec![
            "--headless",
            "--listen",
            "/tmp/nvim-agent-test/nvim.sock",
            "--noplugin",
            "-n",
            "-i",
            "NONE",
        ]
    );
}

#[test]
fn test_extra_args_are_allowlisted() {
    common::init_logging();

    let options = SessionOptions::builder()
        .extra_arg("--clean", None)
        .extra_arg("--cmd", Some("set shiftwidth=2".to_string()))
        .extra_arg("--startuptime", Some("/tmp/log".to_string()))
        .extra_arg("-u", Some("NONE".to_string()))
        .build();

    let args = args_of(&options);
    assert!(args.ends_with(&[
        "--clean".to_string(),
        "--cmd".to_string(),
        "set shiftwidth=2".to_string(),
        "-u".to_string(),
        "NONE".to_string(),
    ]));
    assert!(!args.iter().any(|a| a == "--startuptime"));
}

#[test]
fn test_dangerous_env_is_dropped() {
    common::init_logging();

    let options = SessionOptions::builder()
        .env("LD_PRELOAD", "/tmp/evil.so")
        .env("VIMINIT", "source /tmp/evil.vim")
        .env("NVIM_AGENT_TEST", "1")
        .build();

    let builder = CommandBuilder::new(Path::new("nvim"), Path::new("/tmp/s"), &options);
    let cmd = builder.build();
    let envs: Vec<_> = cmd.as_std().get_envs().map(|(k, _)| k.to_owned()).collect();

    assert!(envs.iter().any(|k| k == OsStr::new("NVIM_AGENT_TEST")));
    assert!(!envs.iter().any(|k| k == OsStr::new("LD_PRELOAD")));
    assert!(!envs.iter().any(|k| k == OsStr::new("VIMINIT")));
}

#[test]
fn test_find_nvim() {
    // Depends on the environment; only the error kind is checked
    match NvimProcess::find_nvim() {
        Ok(path) => assert!(path.exists(), "{}", path.display()),
        Err(e) => assert!(e.is_startup()),
    }
}

#[test]
fn test_socket_path_too_long() {
    common::init_logging();

    let dir = tempfile::tempdir().unwrap();
    let long_name = "s".repeat(MAX_SOCKET_PATH_LEN + 1);
    let options = SessionOptions::builder()
        .nvim_path("/nonexistent/nvim")
        .socket_path(dir.path().join(long_name))
        .build();

    let err = NvimProcess::spawn(SessionId::generate(), &options).unwrap_err();
    assert!(err.is_startup(), "{err}");
    assert!(err.to_string().contains("longer than"), "{err}");
}

#[tokio::test]
async fn test_spawn_and_shutdown() {
    let Some(options) = common::nvim_options() else {
        return;
    };

    let mut process = NvimProcess::spawn(SessionId::generate(), &options).unwrap();
    assert!(process.pid().is_some());
    assert!(process.socket_path().ends_with("nvim.sock"));
    assert!(process.is_running());

    process.kill().await;
    assert!(!process.is_running());
}
