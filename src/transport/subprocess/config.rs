//! Configuration constants for the editor subprocess

use std::time::Duration;

/// File name of the RPC socket inside the private socket directory
pub const SOCKET_FILE_NAME: &str = "nvim.sock";

/// How often to look for the socket while the editor starts
pub const SOCKET_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Longest socket path accepted (`sun_path` is 104 bytes on macOS, 108 on Linux)
pub const MAX_SOCKET_PATH_LEN: usize = 103;

/// Flags passed on every launch, after `--headless --listen <socket>`
///
/// `-n` disables swap files and `-i NONE` skips shada, so scripted sessions
/// leave nothing behind on disk.
pub const BASE_ARGS: &[&str] = &["--noplugin", "-n", "-i", "NONE"];

/// Dangerous environment variables that should not be passed to the editor
///
/// These variables can affect how the subprocess loads and executes code.
pub const DANGEROUS_ENV_VARS: &[&str] = &[
    "LD_PRELOAD",
    "LD_LIBRARY_PATH",
    "DYLD_INSERT_LIBRARIES",
    "DYLD_LIBRARY_PATH",
    "PATH",
    "VIMINIT",
    "NVIM_LISTEN_ADDRESS",
];

/// Allowed extra flags (allowlist approach)
///
/// Only these flags can be passed through `SessionOptions::extra_args`.
pub const ALLOWED_EXTRA_FLAGS: &[&str] = &["--clean", "-u", "--cmd", "-c", "-R", "-Z"];
